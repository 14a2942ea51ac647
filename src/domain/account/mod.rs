//! Account header domain logic

mod classify;
mod copy;
mod format;
mod header;

pub use classify::{
    classify, Classification, KnownAccount, RepresentativeRecord, Representatives, Role,
};
pub use copy::{CopyState, COPY_RESET};
pub use format::{format_address, AddressSegments};
pub use header::{AccountHeader, Clipboard};
