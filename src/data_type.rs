// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use serde::{Deserialize, Serialize};


/// On-disk element encoding of a channel's samples.
///
/// Each variant maps to a `(tag, width)` pair written into the channel
/// metadata record. `Float16` is known to the reader but not produced by any
/// `Sample` implementation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum DataType {
  Float16,
  Float32,
  Int16,
  Int32,
}

impl DataType {
  /// Type tag as stored in the channel metadata record.
  pub fn tag(self) -> u16 {
    match self {
      DataType::Float16 | DataType::Float32 => 0x07,
      DataType::Int16 => 0x03,
      DataType::Int32 => 0x05,
    }
  }

  /// Size of a single element in bytes.
  pub fn width(self) -> u16 {
    match self {
      DataType::Float16 | DataType::Int16 => 2,
      DataType::Float32 | DataType::Int32 => 4,
    }
  }

  pub fn tag_and_width(self) -> (u16, u16) {
    (self.tag(), self.width())
  }
}
