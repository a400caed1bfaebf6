pub mod escrow;
pub mod otp;
pub mod user;
