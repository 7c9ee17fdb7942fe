use seed::{prelude::*, virtual_dom::AtValue, *};
use serde::Deserialize;
use shared::{offices, LatLng, LegResponse, Venue};
use wasm_bindgen::{prelude::wasm_bindgen, JsCast};

pub mod config;
pub mod datefmt;
pub mod images;
pub mod leg;
pub mod overlay;
pub mod round;
pub mod route;
pub mod store;
pub mod surface;
pub mod tooltip;

use overlay::{LegFetch, OverlayKey, OverlayManager};
use store::PlannerStore;
use surface::{JsSurface, LineId, MarkerId};

const SAMPLE_SETUP: &str = r#"[
  { "name": "Zurich", "coordinates": [47.3769, 8.5417], "numAttendees": 12 },
  { "name": "London", "coordinates": [51.5074, -0.1278], "numAttendees": 7 },
  { "name": "Madrid", "coordinates": [40.4168, -3.7038], "numAttendees": 3 }
]"#;

pub(crate) fn debug_log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::debug_1(&format!("[frontend] {message}").into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("[frontend] {message}");
}

pub struct Model {
    store: PlannerStore,
    overlay: OverlayManager<JsSurface>,
    setup_input: String,
    pending_round: bool,
    images: Vec<String>,
    error: Option<String>,
}

pub enum Msg {
    SetupInputChanged(String),
    SubmitSetup,
    RoundFetched(Result<Vec<Venue>, String>),
    VenueSelected(Option<String>),
    MarkerClicked(u32),
    OverlayHover {
        key: Option<OverlayKey>,
        position: LatLng,
    },
    OverlayLeave {
        key: Option<OverlayKey>,
    },
    LegFetched {
        generation: u64,
        origin: String,
        result: Option<LegResponse>,
    },
    ImagesFetched {
        venue_id: String,
        links: Vec<String>,
    },
    Teardown,
}

#[derive(Deserialize)]
struct MarkerClickPayload {
    id: u32,
}

#[derive(Deserialize)]
struct OverlayEventPayload {
    kind: String,
    id: u32,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lng: f64,
}

fn overlay_key(kind: &str, id: u32) -> Option<OverlayKey> {
    match kind {
        "marker" => Some(OverlayKey::Marker(MarkerId(id))),
        "line" => Some(OverlayKey::Line(LineId(id))),
        _ => None,
    }
}

pub fn init(_: Url, orders: &mut impl Orders<Msg>) -> Model {
    orders.stream(streams::window_event(Ev::from("map-marker-click"), |event| {
        let event = event
            .dyn_into::<web_sys::CustomEvent>()
            .expect("map-marker-click event must be CustomEvent");
        let payload: MarkerClickPayload = serde_wasm_bindgen::from_value(event.detail())
            .unwrap_or(MarkerClickPayload { id: 0 });
        Msg::MarkerClicked(payload.id)
    }));
    orders.stream(streams::window_event(
        Ev::from("map-overlay-hover"),
        |event| {
            let event = event
                .dyn_into::<web_sys::CustomEvent>()
                .expect("map-overlay-hover event must be CustomEvent");
            match serde_wasm_bindgen::from_value::<OverlayEventPayload>(event.detail()) {
                Ok(payload) => Msg::OverlayHover {
                    key: overlay_key(&payload.kind, payload.id),
                    position: LatLng::new(payload.lat, payload.lng),
                },
                Err(_) => Msg::OverlayHover {
                    key: None,
                    position: LatLng::new(0.0, 0.0),
                },
            }
        },
    ));
    orders.stream(streams::window_event(
        Ev::from("map-overlay-leave"),
        |event| {
            let event = event
                .dyn_into::<web_sys::CustomEvent>()
                .expect("map-overlay-leave event must be CustomEvent");
            let key = serde_wasm_bindgen::from_value::<OverlayEventPayload>(event.detail())
                .ok()
                .and_then(|payload| overlay_key(&payload.kind, payload.id));
            Msg::OverlayLeave { key }
        },
    ));
    orders.stream(streams::window_event(Ev::from("beforeunload"), |_| {
        Msg::Teardown
    }));

    Model {
        store: PlannerStore::default(),
        overlay: OverlayManager::new(JsSurface),
        setup_input: SAMPLE_SETUP.to_string(),
        pending_round: false,
        images: Vec::new(),
        error: None,
    }
}

pub fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::SetupInputChanged(val) => model.setup_input = val,
        Msg::SubmitSetup => {
            if model.pending_round {
                return;
            }
            match round::parse_setup(&model.setup_input) {
                Ok(origins) => {
                    model.pending_round = true;
                    model.error = None;
                    model.store.set_origins(origins.clone());
                    model
                        .overlay
                        .rebuild_markers(model.store.origins(), model.store.venues());
                    orders.perform_cmd(async move {
                        Msg::RoundFetched(round::fetch_round(origins).await)
                    });
                }
                Err(err) => model.error = Some(err),
            }
        }
        Msg::RoundFetched(result) => {
            model.pending_round = false;
            match result {
                Ok(venues) => {
                    debug_log(&format!("round returned {} venues", venues.len()));
                    model.store.set_venues(venues);
                    model.images.clear();
                    model.error = None;
                    model
                        .overlay
                        .rebuild_markers(model.store.origins(), model.store.venues());
                }
                Err(err) => model.error = Some(err),
            }
        }
        Msg::VenueSelected(id) => {
            if model.store.select(id.as_deref()) {
                sync_selection(model, orders);
            }
        }
        Msg::MarkerClicked(id) => {
            let clicked = model
                .overlay
                .venue_for_marker(MarkerId(id))
                .map(str::to_string);
            let Some(venue_id) = clicked else {
                return;
            };
            // clicking the selected venue's marker toggles the selection off
            let next = if model.store.selected_id() == Some(venue_id.as_str()) {
                None
            } else {
                Some(venue_id)
            };
            if model.store.select(next.as_deref()) {
                sync_selection(model, orders);
            }
        }
        Msg::OverlayHover { key, position } => {
            if let Some(key) = key {
                model.overlay.hover(key, position);
            }
        }
        Msg::OverlayLeave { key } => {
            if let Some(key) = key {
                model.overlay.leave(key);
            }
        }
        Msg::LegFetched {
            generation,
            origin,
            result,
        } => {
            if let Some(leg) = result {
                model.overlay.apply_leg_result(generation, &origin, &leg);
            }
        }
        Msg::ImagesFetched { venue_id, links } => {
            if model.store.selected_id() == Some(venue_id.as_str()) {
                model.images = links;
            }
        }
        Msg::Teardown => {
            model.overlay.teardown();
        }
    }
}

/// Redraw routes for the current selection, then spawn the first-leg fetches
/// and the venue photo lookup.
fn sync_selection(model: &mut Model, orders: &mut impl Orders<Msg>) {
    model.images.clear();
    let fetches = model.overlay.apply_selection(
        model.store.origins(),
        model.store.venues(),
        model.store.selected_id(),
    );
    spawn_leg_fetches(fetches, orders);

    if let Some(venue) = model.store.selected_venue() {
        let venue_id = venue.id.clone();
        let query = format!("{} city", venue.event_location);
        orders.perform_cmd(async move {
            let links = images::fetch_images(query).await;
            Msg::ImagesFetched { venue_id, links }
        });
    }
}

fn spawn_leg_fetches(fetches: Vec<LegFetch>, orders: &mut impl Orders<Msg>) {
    for fetch in fetches {
        let LegFetch {
            generation,
            origin_name,
            request,
        } = fetch;
        orders.perform_cmd(async move {
            let result = leg::fetch_leg(request).await;
            Msg::LegFetched {
                generation,
                origin: origin_name,
                result,
            }
        });
    }
}

pub fn view(model: &Model) -> Node<Msg> {
    div![
        C!["app-container"],
        aside![
            C!["panel"],
            h1!["Meeting Point"],
            view_setup(model),
            view_venues(model),
            view_details(model),
        ],
    ]
}

fn view_setup(model: &Model) -> Node<Msg> {
    form![
        C!["setup"],
        fieldset![
            legend!["Starting locations"],
            textarea![
                attrs! {
                    At::Value => model.setup_input,
                    At::Rows => 8,
                    At::SpellCheck => "false",
                },
                input_ev(Ev::Input, Msg::SetupInputChanged),
            ],
            small!["One entry per city: name, [lat, lng], attendee count."],
        ],
        button![
            if model.pending_round {
                "Planning…"
            } else {
                "Plan a round"
            },
            ev(Ev::Click, |event| {
                event.prevent_default();
                Msg::SubmitSetup
            }),
            attrs! { At::Disabled => bool_attr(model.pending_round) },
        ],
        if let Some(error) = &model.error {
            p![C!["error"], error]
        } else {
            empty![]
        }
    ]
}

fn view_venues(model: &Model) -> Node<Msg> {
    if model.store.venues().is_empty() {
        return div![
            C!["venues"],
            h2!["Venues"],
            p!["Submit starting locations to get ranked venues."],
        ];
    }

    let rows = model.store.venues().iter().map(|venue| {
        let selected = model.store.selected_id() == Some(venue.id.as_str());
        let id = venue.id.clone();
        li![
            C![
                "venue-row",
                IF!(selected => "selected"),
            ],
            span![C!["venue-name"], &venue.event_location],
            span![
                C!["venue-score"],
                venue
                    .total_score
                    .map(|s| format!("{s:.2}"))
                    .unwrap_or_else(|| "—".to_string())
            ],
            span![
                C!["venue-hours"],
                format!(
                    "avg {}",
                    tooltip::format_travel_hours(venue.average_travel_hours)
                )
            ],
            ev(Ev::Click, move |_| {
                Msg::VenueSelected(if selected { None } else { Some(id) })
            }),
        ]
    });

    div![C!["venues"], h2!["Venues"], ol![C!["venue-list"], rows]]
}

fn view_details(model: &Model) -> Node<Msg> {
    let Some(venue) = model.store.selected_venue() else {
        return empty![];
    };

    let card = |label: &str, content: String| {
        div![
            C!["detail-card"],
            span![C!["label"], label],
            strong![content],
        ]
    };

    let address = offices::lookup(&venue.event_location)
        .map(|office| office.address_line())
        .filter(|line| !line.is_empty())
        .unwrap_or_else(|| "Address unknown".to_string());

    let schedule = venue.event_dates.as_ref().or(venue.event_span.as_ref());
    let schedule_start =
        datefmt::format_schedule_field(schedule.and_then(|s| s.start.as_deref()));
    let schedule_end = datefmt::format_schedule_field(schedule.and_then(|s| s.end.as_deref()));

    let attendee_rows = model.store.origins().iter().map(|origin| {
        li![
            span![&origin.name],
            b![tooltip::format_travel_hours(
                venue.travel_hours_for(&origin.name)
            )],
        ]
    });

    let photos = if model.images.is_empty() {
        empty![]
    } else {
        div![
            C!["photos"],
            model
                .images
                .iter()
                .map(|link| img![attrs! { At::Src => link, At::Alt => venue.event_location }]),
        ]
    };

    div![
        C!["details"],
        h2![&venue.event_location],
        div![
            C!["detail-grid"],
            card("Address", address),
            card("From", schedule_start),
            card("To", schedule_end),
            card(
                "Total CO2",
                venue
                    .total_co2
                    .map(|kg| format!("{kg:.0} kg"))
                    .unwrap_or_else(|| "N/A".to_string())
            ),
            card(
                "Median travel",
                tooltip::format_travel_hours(venue.median_travel_hours)
            ),
            card(
                "Longest travel",
                tooltip::format_travel_hours(venue.max_travel_hours)
            ),
        ],
        h3!["Travel hours"],
        ul![C!["attendee-hours"], attendee_rows],
        photos,
    ]
}

fn bool_attr(value: bool) -> AtValue {
    if value {
        AtValue::Some("true".into())
    } else {
        AtValue::Ignored
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    surface::init_map();
    App::start("app", init, update, view);
}
