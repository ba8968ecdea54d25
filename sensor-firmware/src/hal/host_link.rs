// Datenkanal zum Host über den eingebauten USB-Serial-JTAG Controller
//
// Der ESP32-C6 hat kein DTR-Signal im USB-Serial-JTAG Treiber. Als
// Verbindungs-Check dient der SOF-Framezähler: der Host schickt jede
// Millisekunde ein Start-of-Frame, solange das Gerät enumeriert ist.

use esp_hal::Blocking;
use esp_hal::delay::Delay;
use esp_hal::peripherals::USB_DEVICE;
use esp_hal::usb_serial_jtag::UsbSerialJtag;
use sensor_core::{HostLink, LinkError};

pub struct UsbHostLink<'a> {
    usb: UsbSerialJtag<'a, Blocking>,
    delay: Delay,
}

impl<'a> UsbHostLink<'a> {
    pub fn new(usb_device: USB_DEVICE<'a>) -> Self {
        Self {
            usb: UsbSerialJtag::new(usb_device),
            delay: Delay::new(),
        }
    }
}

/// Etwas länger als ein USB Full-Speed Frame (1 ms)
const SOF_WINDOW_US: u32 = 1_100;

/// Aktueller 11-bit SOF-Framezähler
fn sof_frame_index() -> u16 {
    USB_DEVICE::regs().fram_num().read().sof_frame_index().bits()
}

impl<'a> HostLink for UsbHostLink<'a> {
    fn is_connected(&mut self) -> bool {
        // Verbunden wenn sich der Zähler innerhalb eines Frames bewegt
        let before = sof_frame_index();
        self.delay.delay_micros(SOF_WINDOW_US);
        sof_frame_index() != before
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        self.usb.write(bytes).map_err(|_| LinkError::WriteFailed)
    }
}
