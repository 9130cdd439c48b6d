

/// GPIO and UART devices in isolation.
pub mod devices;
