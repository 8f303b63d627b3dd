//! V4L2 capture source.

use crate::error::{Error, Result};
use crate::image::{ChannelOrder, Frame};
use crate::live::FrameSource;
use tracing::{debug, info};
use v4l::FourCC;
use v4l::buffer::Type;
use v4l::device::Device;
use v4l::io::mmap::Stream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;

/// RGB24 pixel format, negotiated at open.
const RGB3: &[u8; 4] = b"RGB3";

/// Capture source backed by a V4L2 device.
///
/// The device handle is held for the lifetime of the source and released
/// when it is dropped; the frame loop owns the source exclusively while
/// running. Pixel format conversion is not implemented: devices that
/// cannot deliver RGB24 are rejected at open rather than having their
/// buffers misread.
pub struct CameraSource {
    device: Device,
    width: u32,
    height: u32,
}

impl CameraSource {
    /// Open a camera device and negotiate the RGB24 format.
    pub fn open(device_path: &str) -> Result<Self> {
        let device = Device::with_path(device_path).map_err(|e| Error::CameraOpen {
            device: device_path.to_string(),
            reason: e.to_string(),
        })?;

        let mut format = device.format().map_err(|e| Error::CameraOpen {
            device: device_path.to_string(),
            reason: e.to_string(),
        })?;
        format.fourcc = FourCC::new(RGB3);
        let format = device.set_format(&format).map_err(|e| Error::CameraOpen {
            device: device_path.to_string(),
            reason: e.to_string(),
        })?;

        if format.fourcc != FourCC::new(RGB3) {
            return Err(Error::CameraOpen {
                device: device_path.to_string(),
                reason: format!("device cannot deliver RGB24, offered {}", format.fourcc),
            });
        }

        info!(
            "Opened camera {device_path} at {}x{} RGB24",
            format.width, format.height
        );

        Ok(Self {
            device,
            width: format.width,
            height: format.height,
        })
    }

}

impl FrameSource for CameraSource {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        let mut stream =
            Stream::with_buffers(&self.device, Type::VideoCapture, 4).map_err(|e| {
                Error::Capture {
                    reason: format!("failed to start capture stream: {e}"),
                }
            })?;

        let (buf, meta) = stream.next().map_err(|e| Error::Capture {
            reason: format!("failed to read frame: {e}"),
        })?;
        debug!("Captured frame seq={} bytes={}", meta.sequence, buf.len());

        let expected = self.width as usize * self.height as usize * 3;
        if buf.len() < expected {
            return Err(Error::Capture {
                reason: format!(
                    "short frame: got {} bytes, expected {expected}",
                    buf.len()
                ),
            });
        }

        // Drivers may pad the buffer past the image; take exactly one frame.
        let frame = Frame::new(
            buf[..expected].to_vec(),
            self.width,
            self.height,
            ChannelOrder::Rgb,
        )?;
        Ok(Some(frame))
    }
}
