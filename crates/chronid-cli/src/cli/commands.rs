use std::io::Write;

use anyhow::Context;
use chrono::SecondsFormat;
use chronid::{Id, ObjectId, ObjectIdGenerator, Ulid, UlidGenerator};
use tracing::{debug, info};

use crate::cli::config::{Command, ObjectIdCommand, UlidCommand, UlidMode};

/// Runs a validated command, writing identifiers and fields to `out`.
pub fn execute(command: &Command, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::Ulid { command } => execute_ulid(command, out),
        Command::ObjectId { command } => execute_object_id(command, out),
    }
}

fn execute_ulid(command: &UlidCommand, out: &mut impl Write) -> anyhow::Result<()> {
    let generator = UlidGenerator::new();
    match command {
        UlidCommand::Generate { mode, count } => {
            let ids: Vec<Ulid> = match mode {
                UlidMode::Monotonic => generator
                    .generate_batch(*count)
                    .context("monotonic generation failed")?,
                UlidMode::Random => (0..*count)
                    .map(|_| generator.generate_random())
                    .collect::<chronid::Result<_>>()
                    .context("random generation failed")?,
                UlidMode::Crypto => (0..*count)
                    .map(|_| generator.generate_crypto())
                    .collect::<chronid::Result<_>>()
                    .context("crypto generation failed")?,
            };
            info!(count = ids.len(), ?mode, "generated ULIDs");
            write_lines(out, &ids)
        }
        UlidCommand::Time { timestamp_ms } => {
            let id = generator
                .generate_with_timestamp(*timestamp_ms)
                .with_context(|| format!("cannot generate a ULID at {timestamp_ms} ms"))?;
            writeln!(out, "{id}")?;
            Ok(())
        }
        UlidCommand::Parse { text } => {
            let id = Ulid::parse(text).with_context(|| format!("`{text}` is not a ULID"))?;
            debug!(?id, "parsed ULID");
            describe_ulid(&id, out)
        }
        UlidCommand::FromUuid { uuid } => {
            writeln!(out, "{}", Ulid::from_uuid(*uuid))?;
            Ok(())
        }
    }
}

fn execute_object_id(command: &ObjectIdCommand, out: &mut impl Write) -> anyhow::Result<()> {
    let generator = ObjectIdGenerator::new();
    match command {
        ObjectIdCommand::Generate { count } => {
            let ids = generator
                .generate_batch(*count)
                .context("ObjectId generation failed")?;
            info!(count = ids.len(), "generated ObjectIds");
            write_lines(out, &ids)
        }
        ObjectIdCommand::Time { timestamp_secs } => {
            writeln!(out, "{}", generator.generate_with_timestamp(*timestamp_secs))?;
            Ok(())
        }
        ObjectIdCommand::Parse { text } => {
            let id =
                ObjectId::parse(text).with_context(|| format!("`{text}` is not an ObjectId"))?;
            debug!(?id, "parsed ObjectId");
            describe_object_id(&id, out)
        }
    }
}

fn write_lines<I: Id>(out: &mut impl Write, ids: &[I]) -> anyhow::Result<()> {
    for id in ids {
        writeln!(out, "{id}")?;
    }
    out.flush()?;
    Ok(())
}

fn describe_ulid(id: &Ulid, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "ulid:         {id}")?;
    writeln!(out, "timestamp_ms: {}", id.timestamp_ms())?;
    writeln!(
        out,
        "datetime:     {}",
        id.datetime_utc().to_rfc3339_opts(SecondsFormat::Millis, true)
    )?;
    writeln!(out, "payload:      {:020x}", id.payload())?;
    writeln!(out, "uuid:         {}", id.to_uuid())?;
    Ok(())
}

fn describe_object_id(id: &ObjectId, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "objectid:        {id}")?;
    writeln!(out, "timestamp_secs:  {}", id.timestamp_secs())?;
    writeln!(
        out,
        "datetime:        {}",
        id.datetime_utc().to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    writeln!(out, "machine_process: {:010x}", id.machine_process())?;
    writeln!(out, "counter:         {}", id.counter())?;
    Ok(())
}
