use snafu::Snafu;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum HelpError {
    /// The registry handed to a reflective render cannot answer a query the render needs.
    #[snafu(display("command registry cannot provide {capability}"))]
    MissingCapability { capability: &'static str },
    #[snafu(display("malformed catalog entry at {entry}: {reason}"))]
    MalformedInput { entry: String, reason: String },
    #[snafu(transparent)]
    SerenityError { source: serenity::Error },
    #[snafu(transparent)]
    JsonError { source: serde_json::Error },
    #[snafu(whatever, display("{message}"))]
    GenericError {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error + Send + Sync>, Some)))]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}
