use frameline::{frame_capacity, FrameDecoder, FrameEncoder};

const CAP: usize = frame_capacity(200);

fn main() {
    let mut encoder = FrameEncoder::<CAP>::new();
    let payload = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
    let written = encoder.write(&payload);
    println!("Payload bytes written: {written}");
    println!("Encoded frame bytes: {:?}", encoder.data());

    let mut decoder = FrameDecoder::<CAP>::new();
    let mut read = [0u8; 200];
    for &byte in encoder.data() {
        if decoder.feed_byte(byte) {
            let len = decoder.read(&mut read);
            println!("Payload bytes read: {len}");
            println!("Decoded payload: {:?}", &read[..len]);
        }
    }
}
