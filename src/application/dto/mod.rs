/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod dependency_request;
mod dependency_response;
mod output_format;
mod reference_request;
mod reference_response;

pub use dependency_request::DependencyRequest;
pub use dependency_response::DependencyResponse;
pub use output_format::OutputFormat;
pub use reference_request::ReferenceRequest;
pub use reference_response::ReferenceResponse;
