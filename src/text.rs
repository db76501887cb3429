// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

/// Copies the bytes of `text` into a zeroed array of capacity `N`.
///
/// Strings longer than `N` bytes are cut after byte `N`, which may split a
/// multi-byte UTF-8 sequence. Readers of the format treat these fields as raw
/// bytes, so that is what we store.
pub fn fixed<const N: usize>(text: &str) -> [u8; N] {
  let mut buf = [0u8; N];
  let bytes = text.as_bytes();
  let len = bytes.len().min(N);
  buf[..len].copy_from_slice(&bytes[..len]);
  buf
}


#[cfg(test)]
mod tests {
  use super::fixed;
  use pretty_assertions::assert_eq;

  #[test]
  fn pads_short_text_test() {
    let buf: [u8; 8] = fixed("SPD");
    assert_eq!(*b"SPD\0\0\0\0\0", buf);

    let buf: [u8; 4] = fixed("");
    assert_eq!([0u8; 4], buf);
  }

  #[test]
  fn truncates_long_text_test() {
    let buf: [u8; 8] = fixed("EngineSpeed");
    assert_eq!(*b"EngineSp", buf);

    // exactly fitting text gets no terminator
    let buf: [u8; 4] = fixed("rpm!");
    assert_eq!(*b"rpm!", buf);
  }

  #[test]
  fn truncates_on_bytes_not_chars_test() {
    // '°' is two bytes in UTF-8, only the first one fits
    let buf: [u8; 2] = fixed("x°C");
    assert_eq!(["x°C".as_bytes()[0], "x°C".as_bytes()[1]], buf);
  }
}
