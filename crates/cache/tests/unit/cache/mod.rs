//! Cache component tests.




/// The access state machine end to end.
pub mod simulator;
