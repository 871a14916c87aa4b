use std::sync::Arc;

use meridian_core_contact_contracts::relay::{ContactRelayError, ContactRelayService};
use meridian_email_contracts::{Email, EmailBody, EmailService};
use meridian_models::{
    contact::ContactRequest,
    delivery::DeliveryReceipt,
    email_address::{EmailAddress, EmailAddressWithName},
};
use meridian_templates_contracts::{ContactInquiryTemplate, TemplateService};

#[derive(Debug, Clone)]
pub struct ContactRelayServiceImpl<Mail, Template> {
    email: Mail,
    template: Template,
    config: ContactRelayConfig,
}

#[derive(Debug, Clone)]
pub struct ContactRelayConfig {
    /// The administrative mailbox receiving all inquiries
    pub recipient: Arc<EmailAddressWithName>,
    /// Sender address to use instead of the submitter's address
    pub sender_override: Option<Arc<EmailAddress>>,
    pub subject_prefix: Arc<str>,
}

impl<Mail, Template> ContactRelayServiceImpl<Mail, Template> {
    pub fn new(email: Mail, template: Template, config: ContactRelayConfig) -> Self {
        Self {
            email,
            template,
            config,
        }
    }
}

impl<Mail, Template> ContactRelayService for ContactRelayServiceImpl<Mail, Template>
where
    Mail: EmailService,
    Template: TemplateService,
{
    async fn send(&self, request: ContactRequest) -> Result<DeliveryReceipt, ContactRelayError> {
        let ContactRequest {
            name,
            email,
            subject,
            message,
        } = request;

        let body = self
            .template
            .render(&ContactInquiryTemplate {
                name: (*name).clone(),
                email: email.as_str().into(),
                subject: (*subject).clone(),
                message: message.into_inner(),
            })
            .map_err(ContactRelayError::Render)?;

        let sender = self
            .config
            .sender_override
            .as_deref()
            .cloned()
            .unwrap_or_else(|| email.clone())
            .with_name(name.into_inner());

        let email = Email {
            sender,
            recipient: (*self.config.recipient).clone(),
            reply_to: Some(email.without_name()),
            subject: format!("{} {}", self.config.subject_prefix, *subject),
            body: EmailBody::Alternative {
                text: body.text,
                html: body.html,
            },
        };

        self.email.send(email).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use meridian_email_contracts::{EmailSendError, MockEmailService};
    use meridian_templates_contracts::{MockTemplateService, RenderedTemplate};
    use meridian_templates_impl::TemplateServiceImpl;
    use meridian_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn config() -> ContactRelayConfig {
        ContactRelayConfig {
            recipient: Arc::new("concierge@meridian.global".parse().unwrap()),
            sender_override: None,
            subject_prefix: "[B2B Inquiry]".into(),
        }
    }

    fn request() -> ContactRequest {
        ContactRequest {
            name: "Jane Doe".try_into().unwrap(),
            email: "jane@example.com".parse().unwrap(),
            subject: "Quote request".try_into().unwrap(),
            message: "Need rates for\nLondon to Tokyo".try_into().unwrap(),
        }
    }

    #[tokio::test]
    async fn compose_inquiry() {
        // Arrange
        let mut email = MockEmailService::new();
        email
            .expect_send()
            .once()
            .withf(|email| {
                let EmailBody::Alternative { text, html } = &email.body else {
                    return false;
                };
                email.sender.0.name.as_deref() == Some("Jane Doe")
                    && email.sender.email() == "jane@example.com"
                    && email.recipient.email() == "concierge@meridian.global"
                    && email.reply_to.as_ref().map(|x| x.email()) == Some("jane@example.com")
                    && email.subject == "[B2B Inquiry] Quote request"
                    && text.contains("Name: Jane Doe")
                    && text.contains("Email: jane@example.com")
                    && text.contains("Subject: Quote request")
                    && text.contains("Need rates for\nLondon to Tokyo")
                    && html.contains("Jane Doe (jane@example.com)")
                    && html.contains("Quote request")
                    && html.contains("Need rates for<br>London to Tokyo")
            })
            .return_once(|_| {
                Box::pin(std::future::ready(Ok(DeliveryReceipt::new(
                    "<1@example.com>",
                ))))
            });

        let sut = ContactRelayServiceImpl::new(email, TemplateServiceImpl::new().unwrap(), config());

        // Act
        let result = sut.send(request()).await;

        // Assert
        assert_eq!(result.unwrap(), DeliveryReceipt::new("<1@example.com>"));
    }

    #[tokio::test]
    async fn multiline_name_becomes_single_line_sender() {
        // Arrange
        let mut email = MockEmailService::new();
        email
            .expect_send()
            .once()
            .withf(|email| email.sender.0.name.as_deref() == Some("Jane Doe"))
            .return_once(|_| {
                Box::pin(std::future::ready(Ok(DeliveryReceipt::new(
                    "<3@example.com>",
                ))))
            });

        let sut = ContactRelayServiceImpl::new(email, TemplateServiceImpl::new().unwrap(), config());

        let request = ContactRequest {
            name: "Jane\nDoe".try_into().unwrap(),
            ..request()
        };

        // Act
        let result = sut.send(request).await;

        // Assert
        assert_eq!(result.unwrap(), DeliveryReceipt::new("<3@example.com>"));
    }

    #[tokio::test]
    async fn sender_override() {
        // Arrange
        let config = ContactRelayConfig {
            sender_override: Some(Arc::new("noreply@meridian.global".parse().unwrap())),
            ..config()
        };

        let template = MockTemplateService::new().with_render(
            ContactInquiryTemplate {
                name: "Jane Doe".into(),
                email: "jane@example.com".into(),
                subject: "Quote request".into(),
                message: "Need rates for\nLondon to Tokyo".into(),
            },
            Ok(RenderedTemplate {
                text: "text".into(),
                html: "html".into(),
            }),
        );

        let email = MockEmailService::new().with_send(
            Email {
                sender: "Jane Doe <noreply@meridian.global>".parse().unwrap(),
                recipient: "concierge@meridian.global".parse().unwrap(),
                reply_to: Some("jane@example.com".parse().unwrap()),
                subject: "[B2B Inquiry] Quote request".into(),
                body: EmailBody::Alternative {
                    text: "text".into(),
                    html: "html".into(),
                },
            },
            Ok(DeliveryReceipt::new("<2@meridian.global>")),
        );

        let sut = ContactRelayServiceImpl::new(email, template, config);

        // Act
        let result = sut.send(request()).await;

        // Assert
        assert_eq!(result.unwrap(), DeliveryReceipt::new("<2@meridian.global>"));
    }

    #[tokio::test]
    async fn render_error() {
        // Arrange
        let mut template = MockTemplateService::new();
        template
            .expect_render::<ContactInquiryTemplate>()
            .once()
            .return_once(|_| Err(anyhow!("broken template")));

        let email = MockEmailService::new();

        let sut = ContactRelayServiceImpl::new(email, template, config());

        // Act
        let result = sut.send(request()).await;

        // Assert
        assert_matches!(result, Err(ContactRelayError::Render(_)));
    }

    #[tokio::test]
    async fn delivery_error() {
        // Arrange
        let mut email = MockEmailService::new();
        email.expect_send().once().return_once(|_| {
            Box::pin(std::future::ready(Err(EmailSendError::Transport(anyhow!(
                "connection refused"
            )))))
        });

        let sut = ContactRelayServiceImpl::new(email, TemplateServiceImpl::new().unwrap(), config());

        // Act
        let result = sut.send(request()).await;

        // Assert
        assert_matches!(
            result,
            Err(ContactRelayError::Delivery(EmailSendError::Transport(_)))
        );
    }
}
