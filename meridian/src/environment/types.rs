use meridian_core_contact_impl::{relay::ContactRelayServiceImpl, ContactFeatureServiceImpl};
use meridian_core_health_impl::HealthFeatureServiceImpl;
use meridian_email_impl::EmailServiceImpl;
use meridian_templates_impl::TemplateServiceImpl;

pub type RestServer = meridian_api_rest::RestServer<Health, Contact>;

// Template
pub type Template = TemplateServiceImpl;

// Email
pub type Email = EmailServiceImpl;

// Core
pub type Health = HealthFeatureServiceImpl<Email>;
pub type Contact = ContactFeatureServiceImpl<ContactRelay>;
pub type ContactRelay = ContactRelayServiceImpl<Email, Template>;
