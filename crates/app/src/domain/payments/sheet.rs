//! Payment collection surface.

use async_trait::async_trait;
use mockall::automock;
use tokio::{
    io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stderr, Stdin},
    sync::Mutex,
};
use tracing::info;

use crate::domain::payments::{errors::PaymentError, models::PaymentAuthorization};

/// How the user left the payment sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetOutcome {
    /// The charge was confirmed.
    Completed,

    /// The user backed out. Not an error.
    Cancelled,
}

#[automock]
#[async_trait]
pub trait PaymentSheet: Send + Sync {
    /// Prepare the sheet for `authorization`.
    async fn initialize(&self, authorization: &PaymentAuthorization) -> Result<(), PaymentError>;

    /// Show the sheet and wait for the user.
    async fn present(
        &self,
        authorization: &PaymentAuthorization,
    ) -> Result<SheetOutcome, PaymentError>;
}

/// Payment sheet that asks the operator to confirm on a terminal.
///
/// No card details are collected; confirming stands in for the hosted
/// collection flow.
#[derive(Debug)]
pub struct TerminalPaymentSheet<R, W> {
    io: Mutex<(R, W)>,
}

impl TerminalPaymentSheet<BufReader<Stdin>, Stderr> {
    /// Sheet reading stdin and prompting on stderr.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stderr())
    }
}

impl<R, W> TerminalPaymentSheet<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Sheet reading answers from `reader` and prompting on `writer`.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Mutex::new((reader, writer)),
        }
    }
}

#[async_trait]
impl<R, W> PaymentSheet for TerminalPaymentSheet<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn initialize(&self, authorization: &PaymentAuthorization) -> Result<(), PaymentError> {
        if authorization.client_secret.is_empty() {
            return Err(PaymentError::MissingAuthorization);
        }

        Ok(())
    }

    #[tracing::instrument(name = "payments.sheet.present", skip_all, err)]
    async fn present(
        &self,
        authorization: &PaymentAuthorization,
    ) -> Result<SheetOutcome, PaymentError> {
        let mut io = self.io.lock().await;
        let (reader, writer) = &mut *io;

        let reference = authorization.payment_intent_id.as_deref().unwrap_or("pending");

        writer
            .write_all(format!("Confirm payment {reference}? [y/N] ").as_bytes())
            .await?;
        writer.flush().await?;

        let mut answer = String::new();
        reader.read_line(&mut answer).await?;

        let outcome = match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => SheetOutcome::Completed,
            _ => SheetOutcome::Cancelled,
        };

        info!(?outcome, "payment sheet closed");

        Ok(outcome)
    }
}
