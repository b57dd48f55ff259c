#[cfg(not(feature = "tokio-codec"))]
fn main() {
    eprintln!(
        "Enable the `tokio-codec` feature to build this example:\n    cargo run --example tokio_codec --features tokio-codec"
    );
}

#[cfg(feature = "tokio-codec")]
#[tokio::main(flavor = "current_thread")]
async fn main() -> frameline::Result<()> {
    use frameline::frame_capacity;
    use frameline::tokio_codec::FrameCodec;
    use futures::{SinkExt, StreamExt};
    use tokio::io::duplex;
    use tokio_util::codec::Framed;

    type Codec = FrameCodec<{ frame_capacity(64) }>;

    let (client, server) = duplex(1024);
    let mut writer = Framed::new(client, Codec::new());
    let mut reader = Framed::new(server, Codec::new());

    writer.send(b"hello".to_vec()).await?;
    writer.send(b"world".to_vec()).await?;
    drop(writer);

    while let Some(frame) = reader.next().await.transpose()? {
        println!("Received frame: {:?}", String::from_utf8_lossy(&frame));
    }

    Ok(())
}
