use frameline::{frame_capacity, FrameReader, FrameWriter, Result};
use std::io::Cursor;

const CAP: usize = frame_capacity(64);

fn main() -> Result<()> {
    let mut writer = FrameWriter::<_, CAP>::new(Vec::new());
    writer.write_frame(b"ping")?;
    writer.write_frame(b"pong")?;
    let mut encoded = writer.into_inner();

    // Flip a payload bit in the first frame: the reader drops it and moves on.
    encoded[2] ^= 0x04;

    let mut reader = FrameReader::<_, CAP>::new(Cursor::new(encoded));
    while let Some(frame) = reader.read_frame()? {
        println!("Received frame: {:?}", String::from_utf8_lossy(&frame));
    }
    println!("Decoder stats: {:?}", reader.stats());
    Ok(())
}
