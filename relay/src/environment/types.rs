use relay_core_contact_impl::ContactFeatureServiceImpl;
use relay_core_health_impl::HealthFeatureServiceImpl;
use relay_email_impl::EmailServiceImpl;
use relay_shared_impl::time::TimeServiceImpl;

// API
pub type RestServer = relay_api_rest::RestServer<HealthFeature, ContactFeature>;

// Email
pub type Email = EmailServiceImpl;

// Shared
pub type Time = TimeServiceImpl;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<Email>;
pub type HealthFeature = HealthFeatureServiceImpl<Time, Email>;
