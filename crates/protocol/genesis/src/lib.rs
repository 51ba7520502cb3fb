//! Network configuration and ESIP activation schedule for the Ethscriptions
//! derivation pipeline.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod esip;
pub use esip::{Esip, EsipSchedule};

mod network;
pub use network::{Network, NetworkConfig, NetworkError};

mod addresses;
pub use addresses::SystemAddresses;
