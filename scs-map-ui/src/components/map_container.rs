//! Map container component with loading state.

use super::LoadingSpinner;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct MapContainerProps {
    /// The DOM id Mapbox GL JS renders into
    pub id: String,
    #[props(default = false)]
    pub loading: bool,
}

/// Full-viewport container div for the map.
#[component]
pub fn MapContainer(props: MapContainerProps) -> Element {
    rsx! {
        div {
            style: "position: relative; width: 100%; height: 100vh;",
            if props.loading {
                LoadingSpinner {}
            }
            div {
                id: "{props.id}",
                style: "position: absolute; top: 0; bottom: 0; width: 100%;",
            }
        }
    }
}
