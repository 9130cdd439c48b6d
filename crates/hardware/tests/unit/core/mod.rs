/// Taken branches, jumps, the one-cycle redirect bubble, and halting.
pub mod control_flow;



/// GPIO and UART accesses through the MMIO window.
pub mod mmio;


/// ALU, branch comparator, and lane-select tables.
pub mod units;
