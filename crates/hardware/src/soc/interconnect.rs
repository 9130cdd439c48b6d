//! Data bus interconnect: address decode, data memory, and peripherals.
//!
//! This module implements the data-side bus of the core. It provides:
//! 1. **Address decoding:** [`AddressDecoder`] maps a byte address to a [`Route`], a
//!    tagged target plus offset. Execute resolves the route once per access.
//! 2. **Clocked access:** [`Interconnect::clock`] applies the request Execute drives
//!    this cycle on the edge: lane writes, peripheral writes, and registered reads.
//! 3. **Read data:** Lane outputs and the registered peripheral read value are both
//!    available to Write-Back one cycle after the address was driven.

use crate::common::constants::{LANE_SELECT_MASK, MMIO_WINDOW_BYTES};
use crate::soc::devices::gpio::{self, Gpio};
use crate::soc::devices::uart::{self, Uart};
use crate::soc::devices::Device;
use crate::soc::memory::LaneMemory;
use crate::soc::pins::{Pins, PinsOut};

/// Destination of a data-bus access.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Target {
    /// Byte-lane data memory.
    #[default]
    DataMemory,
    /// GPIO output register (readable mirror).
    GpioOut,
    /// GPIO input pins (read-only).
    GpioIn,
    /// UART transmit register.
    UartTx,
    /// UART receive register.
    UartRx,
}

impl Target {
    /// Whether the target is a memory-mapped peripheral register.
    pub fn is_mmio(self) -> bool {
        self != Self::DataMemory
    }
}

/// Result of decoding an address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Route {
    /// Selected target.
    pub target: Target,
    /// Byte offset: within data memory (masked to its capacity) or within the
    /// selected peripheral register.
    pub offset: u32,
}

/// Maps byte addresses to bus targets.
///
/// The MMIO window is 16 bytes at `mmio_base`: GPIO out, GPIO in, UART TX and
/// UART RX at offsets 0x0, 0x4, 0x8 and 0xC. Everything else is data memory,
/// masked to the memory's capacity.
///
/// # Examples
///
/// ```
/// use rvpipe_core::soc::interconnect::{AddressDecoder, Target};
///
/// let decoder = AddressDecoder::new(0x1000_0000, 0x1_0000);
/// assert_eq!(decoder.decode(0x1000_0008).target, Target::UartTx);
/// assert_eq!(decoder.decode(0x0001_0104).offset, 0x104);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressDecoder {
    mmio_base: u32,
    mem_mask: u32,
}

impl AddressDecoder {
    /// Creates a decoder for an MMIO window at `mmio_base` and a data memory of
    /// `mem_bytes` bytes (a power of two).
    pub fn new(mmio_base: u32, mem_bytes: usize) -> Self {
        Self {
            mmio_base,
            mem_mask: (mem_bytes as u64 - 1) as u32,
        }
    }

    /// Base address of the MMIO window.
    pub fn mmio_base(&self) -> u32 {
        self.mmio_base
    }

    /// Decodes a byte address.
    pub fn decode(&self, addr: u32) -> Route {
        let window = addr.wrapping_sub(self.mmio_base);
        if window >= MMIO_WINDOW_BYTES {
            return Route {
                target: Target::DataMemory,
                offset: addr & self.mem_mask,
            };
        }
        let target = match window >> 2 {
            0 => Target::GpioOut,
            1 => Target::GpioIn,
            2 => Target::UartTx,
            _ => Target::UartRx,
        };
        Route {
            target,
            offset: window & LANE_SELECT_MASK,
        }
    }
}

/// The data-bus request Execute drives for one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusRequest {
    /// Effective byte address (as computed, before decoding).
    pub addr: u32,
    /// Decoded destination.
    pub route: Route,
    /// 4-bit byte-lane write-enable; zero for loads and idle cycles.
    pub mask: u8,
    /// Lane-aligned write data.
    pub wdata: u32,
    /// A load is reading the target (enables read side effects).
    pub read: bool,
}

impl BusRequest {
    /// The request driven when Execute holds no memory instruction.
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Data memory plus the peripherals behind the MMIO window.
#[derive(Clone, Debug)]
pub struct Interconnect {
    /// Byte-lane data memory.
    pub dmem: LaneMemory,
    /// GPIO block.
    pub gpio: Gpio,
    /// Serial port.
    pub uart: Uart,
    decoder: AddressDecoder,
    mmio_q: u32,
}

impl Interconnect {
    /// Creates the bus around a data memory.
    ///
    /// # Arguments
    ///
    /// * `dmem` - Data memory (its capacity bounds the decoder's memory mask).
    /// * `mmio_base` - Base address of the 16-byte MMIO window.
    /// * `uart_divisor` - Clock cycles per UART bit.
    pub fn new(dmem: LaneMemory, mmio_base: u32, uart_divisor: u32) -> Self {
        let decoder = AddressDecoder::new(mmio_base, dmem.capacity_bytes());
        Self {
            dmem,
            gpio: Gpio::new(),
            uart: Uart::new(uart_divisor),
            decoder,
            mmio_q: 0,
        }
    }

    /// The address decoder Execute uses to route accesses.
    pub fn decoder(&self) -> &AddressDecoder {
        &self.decoder
    }

    /// Merged data-memory lane outputs for the address latched on the last edge.
    pub fn mem_q(&self) -> u32 {
        self.dmem.q()
    }

    /// Peripheral register value read on the last edge.
    pub fn mmio_q(&self) -> u32 {
        self.mmio_q
    }

    /// Applies one clock edge.
    ///
    /// Devices first advance and sample the input pins; then the request is
    /// applied. The data-memory lanes always latch the address, but only see
    /// write-enables for data-memory targets.
    pub fn clock(&mut self, req: &BusRequest, pins: &Pins) {
        self.gpio.tick(pins);
        self.uart.tick(pins);

        let target = req.route.target;
        let mem_mask = if target.is_mmio() { 0 } else { req.mask };
        self.dmem.clock(req.addr, mem_mask, req.wdata);

        let (device, reg) = match target {
            Target::DataMemory => return,
            Target::GpioOut => (&mut self.gpio as &mut dyn Device, gpio::REG_OUT),
            Target::GpioIn => (&mut self.gpio as &mut dyn Device, gpio::REG_IN),
            Target::UartTx => (&mut self.uart as &mut dyn Device, uart::REG_TX),
            Target::UartRx => (&mut self.uart as &mut dyn Device, uart::REG_RX),
        };
        if req.mask != 0 {
            tracing::trace!(device = device.name(), reg, data = req.wdata, "MMIO write");
            device.write_u32(reg, req.wdata, req.mask);
        }
        if req.read {
            self.mmio_q = device.read_u32(reg);
            tracing::trace!(device = device.name(), reg, data = self.mmio_q, "MMIO read");
        }
    }

    /// Resets the peripherals and the registered read value; memory is untouched.
    pub fn reset(&mut self) {
        self.gpio.reset();
        self.uart.reset();
        self.mmio_q = 0;
    }

    /// Registered output pin levels.
    pub fn pins_out(&self) -> PinsOut {
        PinsOut {
            gpio_out: self.gpio.output(),
            uart_tx: self.uart.tx_line(),
        }
    }
}
