#[cfg(feature = "audio")]
pub mod cpal_out;
