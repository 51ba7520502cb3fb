//! Core data model for the Ethscriptions derivation pipeline: L1/L2 blocks,
//! classified operations, and deposit transaction types.

#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod l1;
pub use l1::{L1Block, L1Log, L1Transaction, TxStatus};

mod operation;
pub use operation::{Operation, TokenParams};

mod deposit;
pub use deposit::{
    DepositTransaction, L1AttributesDeposit, L1_INFO_DEPOSIT_SOURCE_DOMAIN,
    USER_DEPOSIT_SOURCE_DOMAIN,
};

mod l2;
pub use l2::{HeadCache, L2Block};

mod validation;
pub use validation::{
    ExpectedCreation, ExpectedTransfer, ExpectedBlockData, ObservedBlockData, ValidationResult,
    ValidationStats,
};
