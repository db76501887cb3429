// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

//! Fixed-size records of the LD format.
//!
//! Every record is encoded into a zeroed buffer of its exact on-disk size;
//! reserved ranges are simply never touched. All integers are little-endian.
//!
//! ```text
//!   |---------------|
//!   |  HEADER       |
//!   |---------------| <- event offset
//!   |  EVENT        |
//!   |---------------| <- venue offset
//!   |  VENUE        |
//!   |---------------| <- vehicle offset
//!   |  VEHICLE      |
//!   |---------------| <- channels meta offset
//!   |  CHANNEL META |
//!   |  ...          |
//!   |---------------| <- channels data offset
//!   |  CHANNEL DATA |
//!   |  ...          |
//!   |---------------|
//! ```

use std::io::{self, Write};


pub const HEADER_SIZE: usize = 1762;
pub const EVENT_SIZE: usize = 1154;
pub const VENUE_SIZE: usize = 1100;
pub const VEHICLE_SIZE: usize = 260;
pub const CHANNEL_META_SIZE: usize = 124;

// undocumented header values, the reader refuses files without them
const LD_MARKER: u32 = 0x40;
const UNKNOWN_1: u16 = 1;
const UNKNOWN_2: u16 = 0x4240;
const UNKNOWN_3: u16 = 0xF;
const UNKNOWN_4: u16 = 0xADB0;
const DEVICE_SERIAL: u32 = 0x1F44;
const DEVICE_TYPE: [u8; 8] = *b"ADL\0\0\0\0\0";
const DEVICE_VERSION: u16 = 420;
const PRO_LOGGING: u32 = 0xC81A4;

/// Channel ids are assigned sequentially starting here.
pub const CHANNEL_ID_BASE: u16 = 0x2EE1;

pub const SHIFT_DEFAULT: i16 = 0;
pub const MUL_DEFAULT: i16 = 1;
pub const SCALE_DEFAULT: i16 = 1;
pub const DEC_PLACES_DEFAULT: i16 = 0;


fn put(buf: &mut [u8], at: usize, bytes: &[u8]) {
  buf[at..at + bytes.len()].copy_from_slice(bytes);
}


/// File header, always at offset 0.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
  pub channels_meta_offset: u32,
  pub channels_data_offset: u32,
  pub event_offset:         u32,
  pub channels_count:       u32,
  /// `dd/mm/yyyy`
  pub date:                 [u8; 16],
  /// `hh:mm:ss`
  pub time:                 [u8; 16],
  pub driver:               [u8; 64],
  pub vehicle:              [u8; 64],
  pub venue:                [u8; 64],
  pub short_comment:        [u8; 64],
}

impl Header {
  pub fn encode(&self) -> [u8; HEADER_SIZE] {
    let mut buf = [0u8; HEADER_SIZE];

    put(&mut buf, 0, &LD_MARKER.to_le_bytes());
    put(&mut buf, 8, &self.channels_meta_offset.to_le_bytes());
    put(&mut buf, 12, &self.channels_data_offset.to_le_bytes());
    put(&mut buf, 36, &self.event_offset.to_le_bytes());
    put(&mut buf, 64, &UNKNOWN_1.to_le_bytes());
    put(&mut buf, 66, &UNKNOWN_2.to_le_bytes());
    put(&mut buf, 68, &UNKNOWN_3.to_le_bytes());
    put(&mut buf, 70, &DEVICE_SERIAL.to_le_bytes());
    put(&mut buf, 74, &DEVICE_TYPE);
    put(&mut buf, 82, &DEVICE_VERSION.to_le_bytes());
    put(&mut buf, 84, &UNKNOWN_4.to_le_bytes());
    put(&mut buf, 86, &self.channels_count.to_le_bytes());
    put(&mut buf, 94, &self.date);
    put(&mut buf, 126, &self.time);
    put(&mut buf, 158, &self.driver);
    put(&mut buf, 222, &self.vehicle);
    put(&mut buf, 350, &self.venue);
    put(&mut buf, 1502, &PRO_LOGGING.to_le_bytes());
    put(&mut buf, 1572, &self.short_comment);

    buf
  }

  pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
    writer.write_all(&self.encode())
  }
}


#[derive(Clone, Debug, PartialEq)]
pub struct Event {
  pub name:         [u8; 64],
  pub session:      [u8; 64],
  pub comment:      [u8; 1024],
  /// 16 bit wide, unlike the pointers in the header
  pub venue_offset: u16,
}

impl Event {
  pub fn encode(&self) -> [u8; EVENT_SIZE] {
    let mut buf = [0u8; EVENT_SIZE];
    put(&mut buf, 0, &self.name);
    put(&mut buf, 64, &self.session);
    put(&mut buf, 128, &self.comment);
    put(&mut buf, 1152, &self.venue_offset.to_le_bytes());
    buf
  }

  pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
    writer.write_all(&self.encode())
  }
}


#[derive(Clone, Debug, PartialEq)]
pub struct Venue {
  pub name:           [u8; 64],
  pub vehicle_offset: u16,
}

impl Venue {
  pub fn encode(&self) -> [u8; VENUE_SIZE] {
    let mut buf = [0u8; VENUE_SIZE];
    put(&mut buf, 0, &self.name);
    put(&mut buf, 1098, &self.vehicle_offset.to_le_bytes());
    buf
  }

  pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
    writer.write_all(&self.encode())
  }
}


#[derive(Clone, Debug, PartialEq)]
pub struct Vehicle {
  pub id:      [u8; 64],
  /// kg
  pub weight:  u32,
  pub kind:    [u8; 32],
  pub comment: [u8; 32],
}

impl Vehicle {
  pub fn encode(&self) -> [u8; VEHICLE_SIZE] {
    let mut buf = [0u8; VEHICLE_SIZE];
    put(&mut buf, 0, &self.id);
    put(&mut buf, 192, &self.weight.to_le_bytes());
    put(&mut buf, 196, &self.kind);
    put(&mut buf, 228, &self.comment);
    buf
  }

  pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
    writer.write_all(&self.encode())
  }
}


/// One node of the doubly-linked list of channel descriptions. A `0` in
/// `previous_offset` or `next_offset` marks the ends of the list.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelMeta {
  pub previous_offset: u32,
  pub next_offset:     u32,
  pub data_offset:     u32,
  pub data_len:        u32,
  pub channel_id:      u16,
  pub type_tag:        u16,
  pub type_width:      u16,
  pub frequency:       u16,
  pub shift:           i16,
  pub mul:             i16,
  pub scale:           i16,
  pub dec_places:      i16,
  pub name:            [u8; 32],
  pub short_name:      [u8; 8],
  pub unit:            [u8; 12],
}

impl ChannelMeta {
  pub fn encode(&self) -> [u8; CHANNEL_META_SIZE] {
    let mut buf = [0u8; CHANNEL_META_SIZE];

    put(&mut buf, 0, &self.previous_offset.to_le_bytes());
    put(&mut buf, 4, &self.next_offset.to_le_bytes());
    put(&mut buf, 8, &self.data_offset.to_le_bytes());
    put(&mut buf, 12, &self.data_len.to_le_bytes());
    put(&mut buf, 16, &self.channel_id.to_le_bytes());
    put(&mut buf, 18, &self.type_tag.to_le_bytes());
    put(&mut buf, 20, &self.type_width.to_le_bytes());
    put(&mut buf, 22, &self.frequency.to_le_bytes());
    put(&mut buf, 24, &self.shift.to_le_bytes());
    put(&mut buf, 26, &self.mul.to_le_bytes());
    put(&mut buf, 28, &self.scale.to_le_bytes());
    put(&mut buf, 30, &self.dec_places.to_le_bytes());
    put(&mut buf, 32, &self.name);
    put(&mut buf, 64, &self.short_name);
    put(&mut buf, 72, &self.unit);
    // 40 reserved bytes follow

    buf
  }

  pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
    writer.write_all(&self.encode())
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::text::fixed;
  use pretty_assertions::assert_eq;

  fn u16_at(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
  }

  fn u32_at(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
  }

  #[test]
  fn header_test() {
    let header = Header { channels_meta_offset: 4276,
                          channels_data_offset: 4400,
                          event_offset:         1762,
                          channels_count:       1,
                          date:                 fixed("14/11/2020"),
                          time:                 fixed("16:49:39"),
                          driver:               fixed("017"),
                          vehicle:              fixed("AU-RS3-R5-S-S"),
                          venue:                fixed("ARA"),
                          short_comment:        fixed("Q3"), };
    let buf = header.encode();

    assert_eq!(0x40, u32_at(&buf, 0));
    assert_eq!(0, u32_at(&buf, 4));
    assert_eq!(4276, u32_at(&buf, 8));
    assert_eq!(4400, u32_at(&buf, 12));
    assert_eq!(1762, u32_at(&buf, 36));
    assert_eq!(1, u16_at(&buf, 64));
    assert_eq!(0x4240, u16_at(&buf, 66));
    assert_eq!(0xF, u16_at(&buf, 68));
    assert_eq!(0x1F44, u32_at(&buf, 70));
    assert_eq!(b"ADL\0\0\0\0\0", &buf[74..82]);
    assert_eq!(420, u16_at(&buf, 82));
    assert_eq!(0xADB0, u16_at(&buf, 84));
    assert_eq!(1, u32_at(&buf, 86));
    assert_eq!(b"14/11/2020", &buf[94..104]);
    assert_eq!(b"16:49:39", &buf[126..134]);
    assert_eq!(b"017", &buf[158..161]);
    assert_eq!(b"AU-RS3-R5-S-S", &buf[222..235]);
    assert_eq!(b"ARA", &buf[350..353]);
    assert_eq!(0xC81A4, u32_at(&buf, 1502));
    assert_eq!(b"Q3", &buf[1572..1574]);

    // reserved ranges stay zeroed
    assert!(buf[16..36].iter().all(|&b| b == 0));
    assert!(buf[414..1502].iter().all(|&b| b == 0));
    assert!(buf[1636..].iter().all(|&b| b == 0));
  }

  #[test]
  fn event_venue_vehicle_test() {
    let event = Event { name:         fixed("WT-20"),
                        session:      fixed("Q3"),
                        comment:      fixed("dry"),
                        venue_offset: 2916, };
    let buf = event.encode();
    assert_eq!(b"WT-20", &buf[0..5]);
    assert_eq!(b"Q3", &buf[64..66]);
    assert_eq!(b"dry", &buf[128..131]);
    assert_eq!(2916, u16_at(&buf, 1152));

    let venue = Venue { name:           fixed("ARA"),
                        vehicle_offset: 4016, };
    let buf = venue.encode();
    assert_eq!(b"ARA", &buf[0..3]);
    assert!(buf[3..1098].iter().all(|&b| b == 0));
    assert_eq!(4016, u16_at(&buf, 1098));

    let vehicle = Vehicle { id:      fixed("RS3"),
                            weight:  1180,
                            kind:    fixed("TCR"),
                            comment: fixed("spare"), };
    let buf = vehicle.encode();
    assert_eq!(b"RS3", &buf[0..3]);
    assert!(buf[64..192].iter().all(|&b| b == 0));
    assert_eq!(1180, u32_at(&buf, 192));
    assert_eq!(b"TCR", &buf[196..199]);
    assert_eq!(b"spare", &buf[228..233]);
  }

  #[test]
  fn channel_meta_test() {
    let meta = ChannelMeta { previous_offset: 0,
                             next_offset:     4400,
                             data_offset:     4524,
                             data_len:        3,
                             channel_id:      CHANNEL_ID_BASE,
                             type_tag:        7,
                             type_width:      4,
                             frequency:       100,
                             shift:           SHIFT_DEFAULT,
                             mul:             MUL_DEFAULT,
                             scale:           SCALE_DEFAULT,
                             dec_places:      DEC_PLACES_DEFAULT,
                             name:            fixed("Speed"),
                             short_name:      fixed("SPD"),
                             unit:            fixed("km/h"), };
    let buf = meta.encode();

    assert_eq!(0, u32_at(&buf, 0));
    assert_eq!(4400, u32_at(&buf, 4));
    assert_eq!(4524, u32_at(&buf, 8));
    assert_eq!(3, u32_at(&buf, 12));
    assert_eq!(0x2EE1, u16_at(&buf, 16));
    assert_eq!(7, u16_at(&buf, 18));
    assert_eq!(4, u16_at(&buf, 20));
    assert_eq!(100, u16_at(&buf, 22));
    assert_eq!(&[0u8, 0, 1, 0, 1, 0, 0, 0][..], &buf[24..32]);
    assert_eq!(b"Speed", &buf[32..37]);
    assert_eq!(b"SPD", &buf[64..67]);
    assert_eq!(b"km/h", &buf[72..76]);
    assert!(buf[84..].iter().all(|&b| b == 0));
  }

  #[test]
  fn write_test() {
    let venue = Venue { name:           fixed("ARA"),
                        vehicle_offset: 4016, };
    let mut sink = Vec::new();
    venue.write(&mut sink).unwrap();
    assert_eq!(VENUE_SIZE, sink.len());
    assert_eq!(&venue.encode()[..], &sink[..]);
  }
}
