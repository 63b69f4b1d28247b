use anyhow::{bail, Context, Result};
use sheen_site::{ContactFields, ContactForm, FormRelay, FormStatus, HttpFormRelay, SiteConfig};

pub async fn run(config: &SiteConfig, name: String, email: String, message: String) -> Result<()> {
    let relay = HttpFormRelay::new(&config.contact).context("Contact relay is not usable")?;

    let mut form = ContactForm::new(&config.contact);
    form.set_fields(ContactFields {
        name,
        email,
        message,
    });
    let submission = form.begin_submit().context("Message rejected")?;

    tracing::info!(endpoint = relay.endpoint(), "sending message");
    let outcome = relay.submit(&submission).await;
    let detail = outcome.as_ref().err().map(ToString::to_string);

    match form.finish(outcome, 0.0) {
        FormStatus::Success => {
            println!("Message sent.");
            Ok(())
        }
        _ => bail!(
            "Message not delivered: {}",
            detail.unwrap_or_else(|| "unknown error".to_string())
        ),
    }
}
