use anyhow::Context;
use rusoto_core::credential::DefaultCredentialsProvider;
use rusoto_core::HttpClient;

/// Builds a rusoto client over a fresh HTTPS dispatcher and the default credential chain,
/// reporting setup failures instead of panicking like the `Client::new` shortcuts do.
pub fn client<C, F>(build: F) -> anyhow::Result<C>
where
    F: FnOnce(HttpClient, DefaultCredentialsProvider) -> C,
{
    let dispatcher = HttpClient::new().context("failed to create HTTPS dispatcher")?;
    let credentials =
        DefaultCredentialsProvider::new().context("failed to create AWS credentials provider")?;
    Ok(build(dispatcher, credentials))
}
