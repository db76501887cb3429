// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use super::DataType;
use getset::{CopyGetters, Getters};


mod sealed {
  pub trait Sealed {}
}

/// Element types a channel can hold. Implemented for `f32`, `i16` and `i32`
/// only; the trait is sealed.
pub trait Sample: Copy + Default + sealed::Sealed {
  const DATA_TYPE: DataType;

  /// Appends the little-endian encoding of `self` to `buf`.
  fn extend_le(self, buf: &mut Vec<u8>);

  /// Typed access to a channel after it was handed to an `LdFile`.
  fn downcast_ref(channel: &AnyChannel) -> Option<&Channel<Self>>;

  fn downcast_mut(channel: &mut AnyChannel) -> Option<&mut Channel<Self>>;
}


/// A named stream of samples recorded at a fixed frequency.
#[derive(Clone, Debug, Default, PartialEq, CopyGetters, Getters)]
pub struct Channel<T: Sample> {
  /// Hz
  #[getset(get_copy = "pub")]
  frequency:  u16,
  #[getset(get = "pub")]
  name:       String,
  /// Only the first 8 bytes make it into the file.
  #[getset(get = "pub")]
  short_name: String,
  #[getset(get = "pub")]
  unit:       String,
  samples:    Vec<T>,
}

impl<T: Sample> Channel<T> {
  pub fn new(frequency: u16, name: &str, short_name: &str, unit: &str) -> Self {
    Self::with_samples(frequency, name, short_name, unit, Vec::new())
  }

  pub fn with_samples(frequency: u16,
                      name: &str,
                      short_name: &str,
                      unit: &str,
                      samples: Vec<T>)
                      -> Self {
    Self { frequency,
           name: name.to_owned(),
           short_name: short_name.to_owned(),
           unit: unit.to_owned(),
           samples }
  }

  pub fn push(&mut self, sample: T) {
    self.samples.push(sample);
  }

  pub fn samples(&self) -> &[T] {
    &self.samples
  }

  pub fn data_type(&self) -> DataType {
    T::DATA_TYPE
  }

  pub fn len(&self) -> usize {
    self.samples.len()
  }

  pub fn is_empty(&self) -> bool {
    self.samples.is_empty()
  }

  /// Number of bytes the samples occupy in the data region.
  pub fn byte_len(&self) -> usize {
    self.len() * T::DATA_TYPE.width() as usize
  }

  pub fn encode_samples(&self) -> Vec<u8> {
    let mut buf = Vec::with_capacity(self.byte_len());
    for &sample in &self.samples {
      sample.extend_le(&mut buf);
    }
    buf
  }
}

impl<T: Sample> Extend<T> for Channel<T> {
  fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
    self.samples.extend(iter);
  }
}


/// Channel of any supported element type, as stored by `LdFile`.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyChannel {
  Float32(Channel<f32>),
  Int16(Channel<i16>),
  Int32(Channel<i32>),
}

macro_rules! dispatch {
  ($any:expr, $channel:ident => $body:expr) => {
    match $any {
      AnyChannel::Float32($channel) => $body,
      AnyChannel::Int16($channel) => $body,
      AnyChannel::Int32($channel) => $body,
    }
  };
}

impl AnyChannel {
  pub fn data_type(&self) -> DataType {
    dispatch!(self, c => c.data_type())
  }

  pub fn frequency(&self) -> u16 {
    dispatch!(self, c => c.frequency())
  }

  pub fn name(&self) -> &str {
    dispatch!(self, c => c.name().as_str())
  }

  pub fn short_name(&self) -> &str {
    dispatch!(self, c => c.short_name().as_str())
  }

  pub fn unit(&self) -> &str {
    dispatch!(self, c => c.unit().as_str())
  }

  pub fn len(&self) -> usize {
    dispatch!(self, c => c.len())
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn byte_len(&self) -> usize {
    dispatch!(self, c => c.byte_len())
  }

  pub fn encode_samples(&self) -> Vec<u8> {
    dispatch!(self, c => c.encode_samples())
  }
}


/// This macro - internal use only - implements `Sample` for a primitive and
/// wires it up with its `AnyChannel` variant.
macro_rules! implement_sample {
  ($($Type:ty => $Variant:ident),*) => {$(
    impl sealed::Sealed for $Type {}

    impl Sample for $Type {
      const DATA_TYPE: DataType = DataType::$Variant;

      fn extend_le(self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.to_le_bytes());
      }

      fn downcast_ref(channel: &AnyChannel) -> Option<&Channel<Self>> {
        match channel {
          AnyChannel::$Variant(channel) => Some(channel),
          _ => None,
        }
      }

      fn downcast_mut(channel: &mut AnyChannel) -> Option<&mut Channel<Self>> {
        match channel {
          AnyChannel::$Variant(channel) => Some(channel),
          _ => None,
        }
      }
    }

    impl From<Channel<$Type>> for AnyChannel {
      fn from(channel: Channel<$Type>) -> Self {
        AnyChannel::$Variant(channel)
      }
    }
  )*}
}

implement_sample!(f32 => Float32, i16 => Int16, i32 => Int32);
