//! PCI configuration space access for x86_64.
//!
//! Read-only enumeration through the legacy configuration mechanism (ports
//! 0xCF8/0xCFC), used at boot to report USB host controllers.
//!
//! # References
//!
//! - PCI Local Bus Specification, Section 3.2.2.3.2 "Configuration Mechanism #1"

use core::fmt;
use x86_64::instructions::port::{Port, PortWriteOnly};

/// PCI configuration address port (0xCF8).
const PCI_CONFIG_ADDRESS: u16 = 0x0CF8;

/// PCI configuration data port (0xCFC).
const PCI_CONFIG_DATA: u16 = 0x0CFC;

/// PCI vendor ID indicating "no device present".
pub const PCI_VENDOR_ID_NONE: u16 = 0xFFFF;

/// Serial bus controller class.
pub const CLASS_SERIAL_BUS: u8 = 0x0C;

/// USB controller subclass of [`CLASS_SERIAL_BUS`].
pub const SUBCLASS_USB: u8 = 0x03;

/// PCI configuration space register offsets.
pub mod reg {
    /// Vendor ID (16-bit).
    pub const VENDOR_ID: u8 = 0x00;
    /// Device ID (16-bit).
    pub const DEVICE_ID: u8 = 0x02;
    /// Class code (24-bit: prog IF, subclass, class).
    pub const CLASS_CODE: u8 = 0x09;
    /// Header type (8-bit).
    pub const HEADER_TYPE: u8 = 0x0E;
}

/// Header type bit marking a multi-function device.
const MULTI_FUNCTION: u8 = 0x80;

/// A PCI device address (bus, device, function).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PciAddress {
    /// Bus number (0-255).
    pub bus: u8,
    /// Device number (0-31).
    pub device: u8,
    /// Function number (0-7).
    pub function: u8,
}

impl PciAddress {
    /// Create a new PCI address.
    pub const fn new(bus: u8, device: u8, function: u8) -> Self {
        Self {
            bus,
            device,
            function,
        }
    }

    /// Build the 32-bit CONFIG_ADDRESS value for a given register offset.
    fn config_address(self, offset: u8) -> u32 {
        let bus32 = self.bus as u32;
        let dev32 = (self.device & 0x1F) as u32;
        let func32 = (self.function & 0x07) as u32;
        let off32 = (offset & 0xFC) as u32; // Must be 4-byte aligned

        // Bit 31: Enable bit
        // Bits 23-16: Bus number
        // Bits 15-11: Device number
        // Bits 10-8: Function number
        // Bits 7-0: Register offset (low 2 bits always 0)
        0x8000_0000 | (bus32 << 16) | (dev32 << 11) | (func32 << 8) | off32
    }
}

impl fmt::Display for PciAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}:{:02x}.{:x}", self.bus, self.device, self.function)
    }
}

/// Read a 32-bit value from PCI configuration space.
pub fn read_config_u32(addr: PciAddress, offset: u8) -> u32 {
    let config_addr = addr.config_address(offset);

    // SAFETY: Port I/O to PCI config space is safe. The ports are well-defined
    // and reading from them does not corrupt memory.
    unsafe {
        let mut addr_port: PortWriteOnly<u32> = PortWriteOnly::new(PCI_CONFIG_ADDRESS);
        let mut data_port: Port<u32> = Port::new(PCI_CONFIG_DATA);

        addr_port.write(config_addr);
        data_port.read()
    }
}

/// Read a 16-bit value from PCI configuration space.
pub fn read_config_u16(addr: PciAddress, offset: u8) -> u16 {
    let dword = read_config_u32(addr, offset & 0xFC);
    let shift = ((offset & 2) * 8) as u32;
    ((dword >> shift) & 0xFFFF) as u16
}

/// Read an 8-bit value from PCI configuration space.
pub fn read_config_u8(addr: PciAddress, offset: u8) -> u8 {
    let dword = read_config_u32(addr, offset & 0xFC);
    let shift = ((offset & 3) * 8) as u32;
    ((dword >> shift) & 0xFF) as u8
}

/// USB host controller generations, by programming interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsbKind {
    /// USB 1.x, Intel register model.
    Uhci,
    /// USB 1.x, open register model.
    Ohci,
    /// USB 2.0.
    Ehci,
    /// USB 3.x.
    Xhci,
    /// Any other programming interface.
    Other(u8),
}

impl UsbKind {
    /// Classifies a USB controller by its programming interface byte.
    pub fn from_prog_if(prog_if: u8) -> Self {
        match prog_if {
            0x00 => UsbKind::Uhci,
            0x10 => UsbKind::Ohci,
            0x20 => UsbKind::Ehci,
            0x30 => UsbKind::Xhci,
            other => UsbKind::Other(other),
        }
    }
}

impl fmt::Display for UsbKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsbKind::Uhci => f.write_str("UHCI"),
            UsbKind::Ohci => f.write_str("OHCI"),
            UsbKind::Ehci => f.write_str("EHCI"),
            UsbKind::Xhci => f.write_str("xHCI"),
            UsbKind::Other(prog_if) => write!(f, "prog-if {:#04x}", prog_if),
        }
    }
}

/// Information about a discovered PCI device.
#[derive(Debug, Clone, Copy)]
pub struct PciDevice {
    /// PCI address (bus/device/function).
    pub addr: PciAddress,
    /// Vendor ID.
    pub vendor_id: u16,
    /// Device ID.
    pub device_id: u16,
    /// Base class.
    pub class: u8,
    /// Subclass.
    pub subclass: u8,
    /// Programming interface.
    pub prog_if: u8,
}

impl PciDevice {
    /// Read device information from a PCI address.
    ///
    /// Returns `None` if no device is present at this address.
    pub fn read(addr: PciAddress) -> Option<Self> {
        let vendor_id = read_config_u16(addr, reg::VENDOR_ID);
        if vendor_id == PCI_VENDOR_ID_NONE {
            return None;
        }

        let device_id = read_config_u16(addr, reg::DEVICE_ID);
        let [_, prog_if, subclass, class] = read_config_u32(addr, reg::CLASS_CODE & 0xFC).to_le_bytes();

        Some(Self {
            addr,
            vendor_id,
            device_id,
            class,
            subclass,
            prog_if,
        })
    }

    /// The controller generation, if this is a USB host controller.
    pub fn usb_kind(&self) -> Option<UsbKind> {
        (self.class == CLASS_SERIAL_BUS && self.subclass == SUBCLASS_USB)
            .then(|| UsbKind::from_prog_if(self.prog_if))
    }
}

/// Scan all PCI buses for devices.
///
/// Calls the provided callback for each discovered device.
pub fn scan<F>(mut callback: F)
where
    F: FnMut(PciDevice),
{
    for bus in 0..=255u8 {
        for device in 0..32u8 {
            // Check function 0 first
            let addr = PciAddress::new(bus, device, 0);
            if let Some(dev) = PciDevice::read(addr) {
                callback(dev);

                let header_type = read_config_u8(addr, reg::HEADER_TYPE);
                if (header_type & MULTI_FUNCTION) != 0 {
                    for function in 1..8u8 {
                        let addr = PciAddress::new(bus, device, function);
                        if let Some(dev) = PciDevice::read(addr) {
                            callback(dev);
                        }
                    }
                }
            }
        }
    }
}

/// Calls `callback` for every USB host controller; returns how many were found.
pub fn scan_usb<F>(mut callback: F) -> usize
where
    F: FnMut(&PciDevice, UsbKind),
{
    let mut found = 0;
    scan(|dev| {
        if let Some(kind) = dev.usb_kind() {
            found += 1;
            callback(&dev, kind);
        }
    });
    found
}
