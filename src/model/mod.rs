pub mod alignment;
pub mod pair_type;

pub use alignment::{AlignmentDescriptor, CigarInfo, Strand};
pub use pair_type::PairType;
