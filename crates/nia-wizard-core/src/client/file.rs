//! Read-modify-write of registrations kept in agent config files.

use std::path::PathBuf;

use anyhow::Context;
use serde_json::Value;
use tracing::{debug, info};

use crate::client::{ClientContext, ClientError, McpClient};
use crate::config::codec::{ConfigCodec, codec_for};

/// Resolve the config file and a codec for it.
pub fn open<C>(client: &C, ctx: &ClientContext) -> Result<(PathBuf, Box<dyn ConfigCodec>), ClientError>
where
    C: McpClient + ?Sized,
{
    let format = client.config_format().ok_or(ClientError::UsesCli {
        client: client.name(),
    })?;
    let path = client.config_path(ctx)?;
    Ok((path, codec_for(format)))
}

/// Value stored at the client's registration path, if any.
pub fn read_registration<C>(client: &C, ctx: &ClientContext) -> anyhow::Result<Option<Value>>
where
    C: McpClient + ?Sized,
{
    let (path, codec) = open(client, ctx)?;
    if !path.exists() {
        return Ok(None);
    }
    let doc = codec
        .read(&path)
        .with_context(|| format!("Failed to read {} config", client.name()))?;
    let found = codec.get_key_path(&doc, &client.registration_path())?;
    Ok(found)
}

/// Whether an object registration is present. Errors count as "no".
pub fn has_registration<C>(client: &C, ctx: &ClientContext) -> bool
where
    C: McpClient + ?Sized,
{
    match read_registration(client, ctx) {
        Ok(found) => found.is_some_and(|value| value.is_object()),
        Err(err) => {
            debug!(client = client.name(), error = %format!("{err:#}"), "installation check failed");
            false
        }
    }
}

/// Set the registration, creating the file and its parents when missing.
///
/// Nothing is written when the existing file cannot be parsed.
pub fn write_registration<C>(client: &C, ctx: &ClientContext, value: &Value) -> anyhow::Result<()>
where
    C: McpClient + ?Sized,
{
    let (path, codec) = open(client, ctx)?;
    let doc = codec
        .read(&path)
        .with_context(|| format!("Failed to read {} config", client.name()))?;
    let updated = codec
        .set_key_path(&doc, &client.registration_path(), value)
        .with_context(|| format!("Failed to update {}", path.display()))?;
    if updated == doc {
        debug!(client = client.name(), path = %path.display(), "registration already up to date");
        return Ok(());
    }
    codec.write(&path, &updated)?;
    info!(client = client.name(), path = %path.display(), "registration written");
    Ok(())
}

/// Remove the registration. A missing file or entry counts as removed.
pub fn delete_registration<C>(client: &C, ctx: &ClientContext) -> anyhow::Result<()>
where
    C: McpClient + ?Sized,
{
    let (path, codec) = open(client, ctx)?;
    if !path.exists() {
        return Ok(());
    }
    let doc = codec
        .read(&path)
        .with_context(|| format!("Failed to read {} config", client.name()))?;
    let updated = codec
        .delete_key_path(&doc, &client.registration_path())
        .with_context(|| format!("Failed to update {}", path.display()))?;
    if updated != doc {
        codec.write(&path, &updated)?;
        info!(client = client.name(), path = %path.display(), "registration removed");
    }
    Ok(())
}
