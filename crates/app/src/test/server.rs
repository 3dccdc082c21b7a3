//! Local TCP endpoint that accepts a connection and never answers.

use std::io;

use tokio::{net::TcpListener, sync::oneshot};
use url::Url;

/// Start the endpoint. The accepted connection stays open until the returned
/// sender is dropped.
pub(crate) async fn unresponsive() -> io::Result<(Url, oneshot::Sender<()>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let url = Url::parse(&format!("http://{}", listener.local_addr()?)).map_err(io::Error::other)?;

    let (release, released) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let accepted = listener.accept().await;
        let _released = released.await;

        drop(accepted);
    });

    Ok((url, release))
}

/// URL of a local port with nothing listening on it.
pub(crate) async fn refusing() -> io::Result<Url> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;

    drop(listener);

    Url::parse(&format!("http://{address}")).map_err(io::Error::other)
}
