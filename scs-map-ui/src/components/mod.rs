//! Dioxus RSX components for the stalled sites map.

mod layer_toggle;
mod legend;
mod loading_spinner;
mod map_container;
mod notification_banner;
mod search_box;

pub use layer_toggle::LayerToggle;
pub use legend::Legend;
pub use loading_spinner::LoadingSpinner;
pub use map_container::MapContainer;
pub use notification_banner::NotificationBanner;
pub use search_box::SearchBox;
