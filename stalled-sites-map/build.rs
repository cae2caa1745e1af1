// Endpoints and the Mapbox token are baked in at build time via option_env!.
fn main() {
    for var in ["MAPBOX_ACCESS_TOKEN", "SCS_SITES_URL", "SCS_REGIONS_URL"] {
        println!("cargo:rerun-if-env-changed={}", var);
    }
}
