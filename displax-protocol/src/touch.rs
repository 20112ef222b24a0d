//! Touch report frames
//!
//! Frame layout (72 bytes):
//! - HEADER (4 bytes): `04 00 40 00`, i.e. report id 0x0004 followed by the
//!   payload length 0x0040
//! - PAYLOAD (64 bytes): reserved(1) + 6 touch slots × 10 bytes +
//!   touch count(1) + scan time(2, LE)
//! - CRC (4 bytes, LE): [`crc32`](crate::crc::crc32) over header and payload
//!
//! Touch slot layout (10 bytes): status(1, 0 = inactive), id(1), x(2, LE),
//! y(2, LE), width(1), height(1), pressure(2, LE).

use heapless::Vec;

use crate::crc::crc32;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Touch report header
pub const TOUCH_HEADER: [u8; 4] = [0x04, 0x00, 0x40, 0x00];

/// Header size in bytes
pub const TOUCH_HEADER_SIZE: usize = 4;

/// Payload size in bytes
pub const TOUCH_PAYLOAD_SIZE: usize = 64;

/// CRC trailer size in bytes
pub const TOUCH_CRC_SIZE: usize = 4;

/// Complete frame size
pub const TOUCH_REPORT_SIZE: usize = TOUCH_HEADER_SIZE + TOUCH_PAYLOAD_SIZE + TOUCH_CRC_SIZE;

/// Touch slots carried by every report
pub const MAX_TOUCHES: usize = 6;

/// Size of a single touch slot
pub const TOUCH_SLOT_SIZE: usize = 10;

// Offsets within the payload
const SLOTS_OFFSET: usize = 1;
const TOUCH_COUNT_OFFSET: usize = SLOTS_OFFSET + MAX_TOUCHES * TOUCH_SLOT_SIZE;
const SCAN_TIME_OFFSET: usize = TOUCH_COUNT_OFFSET + 1;

/// CRC-covered region (header + payload)
const CRC_REGION: usize = TOUCH_HEADER_SIZE + TOUCH_PAYLOAD_SIZE;

/// Sensor frame dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameSize {
    pub width: u16,
    pub height: u16,
}

impl FrameSize {
    /// Size assumed until the sensor reports its own
    pub const DEFAULT: FrameSize = FrameSize::new(1050, 650);

    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl Default for FrameSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A single active contact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
    /// Contact slot identifier (0-5)
    pub id: u8,
    /// X coordinate in sensor units (0 to `frame_width`)
    pub x: u16,
    /// Y coordinate in sensor units (0 to `frame_height`)
    pub y: u16,
    /// Contact width
    pub width: u8,
    /// Contact height
    pub height: u8,
    /// Contact pressure
    pub pressure: u16,
    /// Frame width at the time the report was parsed
    pub frame_width: u16,
    /// Frame height at the time the report was parsed
    pub frame_height: u16,
    pub active: bool,
}

impl TouchPoint {
    /// Position relative to the frame, each axis in `0.0..=1.0`
    ///
    /// An axis with a zero frame dimension reports 0.0.
    pub fn normalized(&self) -> (f32, f32) {
        fn ratio(value: u16, extent: u16) -> f32 {
            if extent == 0 {
                0.0
            } else {
                (value as f32 / extent as f32).clamp(0.0, 1.0)
            }
        }

        (ratio(self.x, self.frame_width), ratio(self.y, self.frame_height))
    }
}

/// Raw touch slot as carried in the payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSlot {
    /// Non-zero when the slot holds an active contact
    pub status: u8,
    pub id: u8,
    pub x: u16,
    pub y: u16,
    pub width: u8,
    pub height: u8,
    pub pressure: u16,
}

impl TouchSlot {
    fn decode(bytes: &[u8]) -> Self {
        Self {
            status: bytes[0],
            id: bytes[1],
            x: u16::from_le_bytes([bytes[2], bytes[3]]),
            y: u16::from_le_bytes([bytes[4], bytes[5]]),
            width: bytes[6],
            height: bytes[7],
            pressure: u16::from_le_bytes([bytes[8], bytes[9]]),
        }
    }

    fn encode(&self, out: &mut [u8]) {
        out[0] = self.status;
        out[1] = self.id;
        out[2..4].copy_from_slice(&self.x.to_le_bytes());
        out[4..6].copy_from_slice(&self.y.to_le_bytes());
        out[6] = self.width;
        out[7] = self.height;
        out[8..10].copy_from_slice(&self.pressure.to_le_bytes());
    }

    fn to_point(self, frame: FrameSize) -> TouchPoint {
        TouchPoint {
            id: self.id,
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            pressure: self.pressure,
            frame_width: frame.width,
            frame_height: frame.height,
            active: true,
        }
    }
}

/// Reasons a candidate frame is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchReportError {
    /// Fewer than [`TOUCH_REPORT_SIZE`] bytes available
    Truncated,
    /// First four bytes are not [`TOUCH_HEADER`]
    InvalidHeader,
    /// Declared payload length is not [`TOUCH_PAYLOAD_SIZE`]
    PayloadSize(u16),
    /// CRC trailer does not match the checksum of header and payload
    CrcMismatch { expected: u32, actual: u32 },
}

/// A decoded touch report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TouchReport {
    /// Active contacts in slot order
    pub points: Vec<TouchPoint, MAX_TOUCHES>,
    /// Sensor scan time
    pub scan_time: u16,
}

impl TouchReport {
    /// Validate and decode a frame from the start of `data`
    ///
    /// Checks run in order: header, payload length, CRC. Every active slot
    /// within the reported touch count is stamped with `frame`.
    pub fn parse(data: &[u8], frame: FrameSize) -> Result<Self, TouchReportError> {
        if data.len() < TOUCH_REPORT_SIZE {
            return Err(TouchReportError::Truncated);
        }
        let data = &data[..TOUCH_REPORT_SIZE];

        if data[..TOUCH_HEADER_SIZE] != TOUCH_HEADER {
            return Err(TouchReportError::InvalidHeader);
        }

        let payload_size = u16::from_le_bytes([data[2], data[3]]);
        if payload_size as usize != TOUCH_PAYLOAD_SIZE {
            return Err(TouchReportError::PayloadSize(payload_size));
        }

        let expected = crc32(&data[..CRC_REGION]);
        let actual = u32::from_le_bytes([
            data[CRC_REGION],
            data[CRC_REGION + 1],
            data[CRC_REGION + 2],
            data[CRC_REGION + 3],
        ]);
        if expected != actual {
            return Err(TouchReportError::CrcMismatch { expected, actual });
        }

        let payload = &data[TOUCH_HEADER_SIZE..CRC_REGION];
        let touch_count = payload[TOUCH_COUNT_OFFSET] as usize;
        let scan_time =
            u16::from_le_bytes([payload[SCAN_TIME_OFFSET], payload[SCAN_TIME_OFFSET + 1]]);

        let mut points = Vec::new();
        for slot in payload[SLOTS_OFFSET..TOUCH_COUNT_OFFSET]
            .chunks_exact(TOUCH_SLOT_SIZE)
            .take(touch_count.min(MAX_TOUCHES))
            .map(TouchSlot::decode)
            .filter(|slot| slot.status != 0)
        {
            // At most MAX_TOUCHES slots are visited
            let _ = points.push(slot.to_point(frame));
        }

        Ok(Self { points, scan_time })
    }

    /// Build a valid frame, as the sensor would send it
    ///
    /// Slots beyond [`MAX_TOUCHES`] are ignored. `touch_count` is written
    /// verbatim so callers can also produce reports where it disagrees with
    /// the slot contents.
    pub fn encode(slots: &[TouchSlot], touch_count: u8, scan_time: u16) -> [u8; TOUCH_REPORT_SIZE] {
        let mut frame = [0u8; TOUCH_REPORT_SIZE];
        frame[..TOUCH_HEADER_SIZE].copy_from_slice(&TOUCH_HEADER);

        let payload = &mut frame[TOUCH_HEADER_SIZE..CRC_REGION];
        for (slot, out) in slots
            .iter()
            .zip(payload[SLOTS_OFFSET..TOUCH_COUNT_OFFSET].chunks_exact_mut(TOUCH_SLOT_SIZE))
        {
            slot.encode(out);
        }
        payload[TOUCH_COUNT_OFFSET] = touch_count;
        payload[SCAN_TIME_OFFSET..SCAN_TIME_OFFSET + 2].copy_from_slice(&scan_time.to_le_bytes());

        let crc = crc32(&frame[..CRC_REGION]);
        frame[CRC_REGION..].copy_from_slice(&crc.to_le_bytes());
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn slot(id: u8, x: u16, y: u16) -> TouchSlot {
        TouchSlot {
            status: 1,
            id,
            x,
            y,
            width: 12,
            height: 14,
            pressure: 300,
        }
    }

    #[test]
    fn test_frame_constants() {
        assert_eq!(TOUCH_REPORT_SIZE, 72);
        assert_eq!(SCAN_TIME_OFFSET + 2, TOUCH_PAYLOAD_SIZE);
        assert_eq!(CRC_REGION % 4, 0);
    }

    #[test]
    fn test_parse_empty_report() {
        let frame = TouchReport::encode(&[], 0, 1234);
        let report = TouchReport::parse(&frame, FrameSize::DEFAULT).unwrap();
        assert!(report.points.is_empty());
        assert_eq!(report.scan_time, 1234);
    }

    #[test]
    fn test_parse_two_touches() {
        let frame = TouchReport::encode(&[slot(0, 100, 200), slot(3, 900, 50)], 2, 42);
        let report = TouchReport::parse(&frame, FrameSize::new(1920, 1080)).unwrap();

        assert_eq!(report.points.len(), 2);
        let first = report.points[0];
        assert_eq!(first.id, 0);
        assert_eq!((first.x, first.y), (100, 200));
        assert_eq!((first.width, first.height), (12, 14));
        assert_eq!(first.pressure, 300);
        assert_eq!((first.frame_width, first.frame_height), (1920, 1080));
        assert!(first.active);
        assert_eq!(report.points[1].id, 3);
    }

    #[test]
    fn test_inactive_slots_skipped() {
        let mut slots = [slot(0, 1, 1), slot(1, 2, 2), slot(2, 3, 3)];
        slots[1].status = 0;
        let frame = TouchReport::encode(&slots, 3, 0);
        let report = TouchReport::parse(&frame, FrameSize::DEFAULT).unwrap();

        let ids: std::vec::Vec<u8> = report.points.iter().map(|p| p.id).collect();
        assert_eq!(ids, [0, 2]);
    }

    #[test]
    fn test_touch_count_limits_slots() {
        let frame = TouchReport::encode(&[slot(0, 1, 1), slot(1, 2, 2), slot(2, 3, 3)], 1, 0);
        let report = TouchReport::parse(&frame, FrameSize::DEFAULT).unwrap();
        assert_eq!(report.points.len(), 1);
    }

    #[test]
    fn test_touch_count_clamped_to_max() {
        let slots = [slot(0, 1, 1); MAX_TOUCHES];
        let frame = TouchReport::encode(&slots, 0xFF, 0);
        let report = TouchReport::parse(&frame, FrameSize::DEFAULT).unwrap();
        assert_eq!(report.points.len(), MAX_TOUCHES);
    }

    #[test]
    fn test_slot_order_preserved() {
        let frame = TouchReport::encode(&[slot(5, 1, 1), slot(2, 2, 2), slot(4, 3, 3)], 3, 0);
        let report = TouchReport::parse(&frame, FrameSize::DEFAULT).unwrap();
        let ids: std::vec::Vec<u8> = report.points.iter().map(|p| p.id).collect();
        assert_eq!(ids, [5, 2, 4]);
    }

    #[test]
    fn test_truncated() {
        let frame = TouchReport::encode(&[], 0, 0);
        assert_eq!(
            TouchReport::parse(&frame[..71], FrameSize::DEFAULT),
            Err(TouchReportError::Truncated)
        );
    }

    #[test]
    fn test_invalid_header() {
        let mut frame = TouchReport::encode(&[], 0, 0);
        frame[0] = 0x05;
        assert_eq!(
            TouchReport::parse(&frame, FrameSize::DEFAULT),
            Err(TouchReportError::InvalidHeader)
        );
    }

    #[test]
    fn test_crc_mismatch() {
        let mut frame = TouchReport::encode(&[slot(0, 10, 10)], 1, 0);
        frame[10] ^= 0x01;
        assert!(matches!(
            TouchReport::parse(&frame, FrameSize::DEFAULT),
            Err(TouchReportError::CrcMismatch { .. })
        ));
    }

    #[test]
    fn test_crc_mismatch_reports_both_values() {
        let mut frame = TouchReport::encode(&[], 0, 0);
        let expected = crc32(&frame[..CRC_REGION]);
        frame[CRC_REGION] ^= 0xFF;
        let actual = expected ^ 0xFF;

        assert_eq!(
            TouchReport::parse(&frame, FrameSize::DEFAULT),
            Err(TouchReportError::CrcMismatch { expected, actual })
        );
    }

    #[test]
    fn test_normalized() {
        let point = TouchPoint {
            x: 525,
            y: 650,
            frame_width: 1050,
            frame_height: 650,
            ..TouchPoint::default()
        };
        assert_eq!(point.normalized(), (0.5, 1.0));

        let degenerate = TouchPoint {
            x: 10,
            ..TouchPoint::default()
        };
        assert_eq!(degenerate.normalized(), (0.0, 0.0));
    }

    fn slot_strategy() -> impl Strategy<Value = TouchSlot> {
        (1u8..=u8::MAX, any::<u8>(), any::<u16>(), any::<u16>(), any::<u8>(), any::<u8>(), any::<u16>())
            .prop_map(|(status, id, x, y, width, height, pressure)| TouchSlot {
                status,
                id,
                x,
                y,
                width,
                height,
                pressure,
            })
    }

    proptest! {
        #[test]
        fn prop_encoded_report_parses_back(
            slots in proptest::collection::vec(slot_strategy(), 0..=MAX_TOUCHES),
            scan_time in any::<u16>(),
            width in any::<u16>(),
            height in any::<u16>(),
        ) {
            let frame = TouchReport::encode(&slots, slots.len() as u8, scan_time);
            let report = TouchReport::parse(&frame, FrameSize::new(width, height)).unwrap();

            prop_assert_eq!(report.points.len(), slots.len());
            prop_assert_eq!(report.scan_time, scan_time);
            for (point, slot) in report.points.iter().zip(slots.iter()) {
                prop_assert_eq!(point.id, slot.id);
                prop_assert_eq!(point.x, slot.x);
                prop_assert_eq!(point.y, slot.y);
                prop_assert_eq!(point.width, slot.width);
                prop_assert_eq!(point.height, slot.height);
                prop_assert_eq!(point.pressure, slot.pressure);
                prop_assert_eq!(point.frame_width, width);
                prop_assert_eq!(point.frame_height, height);
            }
        }

        #[test]
        fn prop_crc_bit_flip_rejected(bit in 0usize..32) {
            let mut frame = TouchReport::encode(&[], 0, 7);
            frame[CRC_REGION + bit / 8] ^= 1 << (bit % 8);
            let rejected = matches!(
                TouchReport::parse(&frame, FrameSize::DEFAULT),
                Err(TouchReportError::CrcMismatch { .. })
            );
            prop_assert!(rejected);
        }
    }
}
