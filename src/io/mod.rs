mod instance_json;
pub use instance_json::InstanceJsonReader;
pub use instance_json::InstanceJsonWriter;

mod xcsp_writer;
pub use xcsp_writer::XcspWriter;
