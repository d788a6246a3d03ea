pub mod client;
pub mod method;
pub mod request;
pub mod response;

pub use client::HttpClient;
pub use method::HttpMethod;
pub use request::RequestInput;
pub use response::HttpResponse;
