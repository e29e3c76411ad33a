//! Overpass API client: mirrors, slot probing and the retrieval loop.

mod countdown;
mod error;
mod executor;
mod mirror;
pub mod query;
mod retrieval;
mod status;
mod transport;

pub use countdown::{Countdown, ProgressCountdown};
pub use error::OverpassError;
pub use executor::{QueryExecutor, QueryOutcome, NETWORK_ERROR_STATUS};
pub use mirror::{Mirror, DEFAULT_MIRRORS};
pub use retrieval::RetrievalLoop;
pub use status::{parse_status, SlotStatus, StatusProbe, DEFAULT_WAIT_SECONDS};
pub use transport::{
    HttpReply, HttpTransport, Transport, TransportConfig, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};
