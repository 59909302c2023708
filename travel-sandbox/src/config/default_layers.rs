use super::{FillRule, LayerDescriptor, LayerSource, LayerStyle, PopupTemplate};
use crate::model::{buffer::BufferKind, layer::LayerId};

fn vector_symbol(
    id: &str,
    source_id: &str,
    url: &str,
    source_layer: &str,
    icon_image: &str,
    default_visible: bool,
    popup: Option<PopupTemplate>,
) -> LayerDescriptor {
    LayerDescriptor {
        id: LayerId::from(id),
        source_id: source_id.to_string(),
        source: LayerSource::Vector {
            url: url.to_string(),
            source_layer: source_layer.to_string(),
        },
        style: LayerStyle::Symbol {
            icon_image: icon_image.to_string(),
            icon_size: 1.0,
        },
        default_visible,
        min_zoom: 9.0,
        max_zoom: 22.0,
        popup,
    }
}

fn vector_line(
    id: &str,
    source_id: &str,
    url: &str,
    source_layer: &str,
    color: &str,
    width: f64,
) -> LayerDescriptor {
    LayerDescriptor {
        id: LayerId::from(id),
        source_id: source_id.to_string(),
        source: LayerSource::Vector {
            url: url.to_string(),
            source_layer: source_layer.to_string(),
        },
        style: LayerStyle::Line {
            color: color.to_string(),
            width,
            opacity: 0.5,
        },
        default_visible: false,
        min_zoom: 9.0,
        max_zoom: 22.0,
        popup: None,
    }
}

/// the Toronto District School Board study area datasets. only schools are
/// visible on load.
pub fn toronto_layers() -> Vec<LayerDescriptor> {
    vec![
        vector_symbol(
            LayerId::SCHOOLS,
            "schools-data",
            "mapbox://jiahao29.64momvw0",
            "Toronto_District_School_Board-2h6tqy",
            "school",
            true,
            Some(PopupTemplate::new("SCH_NAM3", &[("Address", "ADDRESS_FU")])),
        ),
        vector_line(
            "pedestrian-network",
            "pedestrian-network-data",
            "mapbox://jiahao29.7k33a9d3",
            "Pedestrian_Network_Data_-_432-1c8l6m",
            "black",
            0.5,
        ),
        vector_line(
            "cycling-network",
            "cycling-network-data",
            "mapbox://jiahao29.27vlzyi9",
            "cycling-network_-_4326-51bjie",
            "blue",
            1.0,
        ),
        vector_symbol(
            "subway-stations",
            "subway-stations-data",
            "mapbox://jiahao29.88ilju10",
            "SubwayStops-2um6iw",
            "rail",
            false,
            Some(PopupTemplate::new("STATION", &[("Line", "LINE")])),
        ),
        vector_symbol(
            "traffic-calming",
            "traffic-calming-data",
            "mapbox://jiahao29.7yuzvjzz",
            "Traffic_Calming_Database-2trxy2",
            "border-dot-13",
            false,
            None,
        ),
        vector_symbol(
            "speed-enforcement",
            "speed-enforcement-data",
            "mapbox://jiahao29.alzntmwb",
            "Automated_Speed_Enforcement_L-67qstq",
            "police",
            false,
            None,
        ),
        vector_symbol(
            "watch-your-speed-program",
            "watch-your-speed-data",
            "mapbox://jiahao29.9yvzrd8v",
            "Watch_Your_Speed_Program_Sign-2bje7e",
            "viewpoint",
            false,
            None,
        ),
        vector_symbol(
            "parks",
            "parks-data",
            "mapbox://jiahao29.7qolisqv",
            "Parks_and_Recreation_Faciliti-6txiw4",
            "park",
            false,
            Some(PopupTemplate::new("ASSET_NAME", &[("Address", "ADDRESS")])),
        ),
        LayerDescriptor {
            id: LayerId::from(LayerId::BIKE_SHARE_STATIONS),
            source_id: String::from("bike-share-data"),
            source: LayerSource::GeoJson,
            style: LayerStyle::Symbol {
                icon_image: String::from("bicycle-share"),
                icon_size: 1.0,
            },
            default_visible: false,
            min_zoom: 0.0,
            max_zoom: 24.0,
            popup: Some(PopupTemplate::new(
                "name",
                &[
                    ("Bikes Available", "num_bikes_available"),
                    ("Docks Available", "num_docks_available"),
                    ("Charging Station", "is_charging_station"),
                ],
            )),
        },
    ]
}

/// fill layer drawing the focused school's walking and cycling buffers.
pub fn school_buffers_layer() -> LayerDescriptor {
    LayerDescriptor {
        id: LayerId::from(LayerId::SCHOOL_BUFFERS),
        source_id: String::from("school-buffers"),
        source: LayerSource::GeoJson,
        style: LayerStyle::Fill {
            match_property: String::from(BufferKind::TYPE_PROPERTY),
            rules: vec![
                FillRule {
                    value: BufferKind::Walking.type_tag().to_string(),
                    color: String::from("#FF8E9A"),
                    opacity: 0.4,
                },
                FillRule {
                    value: BufferKind::Cycling.type_tag().to_string(),
                    color: String::from("#A4E2EC"),
                    opacity: 0.5,
                },
            ],
        },
        default_visible: true,
        min_zoom: 0.0,
        max_zoom: 24.0,
        popup: None,
    }
}
