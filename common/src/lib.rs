//! PREML Dashboard Common Library
//!
//! CLIとWeb(WASM)で共有される型・ワイヤ形式・サービスクライアント・ブリッジ

pub mod api;
pub mod bridge;
pub mod client;
pub mod coords;
pub mod display;
pub mod error;
pub mod http_client;
pub mod selection;
pub mod sequence;
pub mod types;

pub use api::{JumpToRequest, MapSource, NewCatalogRequest, Prediction, WindowSession};
pub use bridge::{BridgeState, ChannelTransport, FrameBridge, FrameEvent, Relay};
pub use client::SkyServiceClient;
pub use coords::{parse_ra_dec, arcsec_to_deg, SkyCoord, COORDINATE_HINT, DEFAULT_SEARCH_RADIUS_ARCSEC};
pub use error::{Error, Result};
pub use http_client::HttpClient;
pub use selection::{SelectionEvent, SkyCorner};
pub use sequence::{LoadState, RequestSequencer, SearchSequencer, Ticket};
pub use types::{Band, Cutout, CutoutOutcome, GalaxyDetails, GalaxySummary, MagnitudeValues};
