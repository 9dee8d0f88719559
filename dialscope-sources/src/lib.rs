//! dialscope-sources - pluggable lookup providers
//!
//! Every provider sits behind the [`SignalSource`] trait and returns a
//! [`dialscope_core::SignalResult`], never an error:
//! - **Carrier**: Numverify validity/carrier lookup
//! - **Security**: Twilio Lookup risk data, offline spam-pattern table
//! - **Osint**: Have I Been Pwned breach data, digital-footprint probe
//! - **Presence**: messaging/VoIP/social/business/carrier-status/network
//!   probes
//!
//! Providers without credentials report `Empty`; internal faults and
//! timeouts become `Failed`. Nothing a source does can abort the request.

pub mod breach;
pub mod carrier;
pub mod config;
pub mod presence;
pub mod registry;
pub mod reputation;
pub mod traits;

pub use breach::*;
pub use carrier::*;
pub use config::*;
pub use presence::*;
pub use registry::*;
pub use reputation::*;
pub use traits::*;
