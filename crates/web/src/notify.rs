/// Outbound notification sink. Mail delivery itself is an external
/// collaborator; this transport records the message through structured
/// logging. Callers always treat a send failure as non-fatal: the state
/// change that triggered the notification has already committed.
#[derive(Clone)]
pub struct Notifier {
    from: String,
}

impl Notifier {
    pub fn new(from: &str) -> Self {
        Self {
            from: from.to_string(),
        }
    }

    pub async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        tracing::info!(
            from = %self.from,
            to = %to,
            subject = %subject,
            body = %body,
            "dispatching notification"
        );
        Ok(())
    }
}
