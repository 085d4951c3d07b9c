//! Mail reporters built from shared settings.
//!
//! A real deployment would implement [`MailTransport`] on top of an SMTP
//! client. Here the transport prints the message instead of sending it.
//!
//! # Running this Example
//!
//! ```bash
//! cargo run --example mail_channel
//! ```

use reportmux::{
    DeliveryError, GroupOptions, Mux,
    reporters::mail::{MailMessage, MailReporter, MailTransport},
    trace,
};

struct PrintTransport;

impl MailTransport for PrintTransport {
    fn send(
        &self,
        from: &str,
        recipients: &[String],
        message: &MailMessage,
    ) -> Result<(), DeliveryError> {
        println!("From: {from}");
        println!("To: {}", recipients.join(", "));
        println!("Subject: {}", message.subject);
        println!("Content-Type: {}", message.content_type);
        println!();
        println!("{}", message.body);
        println!("----");
        Ok(())
    }
}

fn main() {
    let settings = match MailReporter::new(PrintTransport, "reports@example.com", "") {
        Ok(settings) => settings.subject_prefix("[shop]"),
        Err(error) => {
            eprintln!("mail setup failed: {error}");
            return;
        }
    };

    let mut mux = Mux::new();
    mux.new_group("devs", GroupOptions::new())
        .add("devs", settings.to(["alice@example.com", "bob@example.com"]))
        .new_group("billing", GroupOptions::new())
        .add("billing", settings.to(["billing@example.com"]));

    if let Err(error) = mux.validate() {
        eprintln!("configuration error: {error}");
        return;
    }

    mux.report(
        "devs",
        &trace!("worker", "thumbnails"),
        "image decode failed",
        "upload 88 is not a valid PNG",
    );
    mux.report("billing", &trace!("cron", "invoices"), "", "3 invoices pending");
}
