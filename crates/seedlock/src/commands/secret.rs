use crate::{
    helpers::{
        messages::{fail, success, warn},
        readline::read_secret,
    },
    Error, Result,
};
use colored::Colorize;
use seedlock_core::{SecretBytes, SecretId};
use seedlock_vault::SecretVault;
use std::io::Read;
use zeroize::Zeroizing;

fn read_input(stdin: bool) -> Result<SecretBytes> {
    let value = if stdin {
        let mut buffer = Zeroizing::new(String::new());
        std::io::stdin().read_to_string(&mut buffer)?;
        let trimmed = buffer.trim_end_matches(['\r', '\n']);
        Zeroizing::new(trimmed.to_owned())
    } else {
        read_secret(None)?
    };
    if value.is_empty() {
        return Err(Error::EmptySecret);
    }
    Ok(SecretBytes::from(value.as_str()))
}

pub async fn save(vault: &SecretVault, alias: &str, stdin: bool) -> Result<()> {
    let secret = read_input(stdin)?;
    let id = vault.save(&secret, alias).await?;
    success(format!("Saved {} as {}", alias, id));
    Ok(())
}

pub async fn update(
    vault: &SecretVault,
    id: &SecretId,
    stdin: bool,
) -> Result<()> {
    let alias = vault.alias(id).await?;
    let secret = read_input(stdin)?;
    vault.update(id, &secret).await?;
    success(format!("Updated {}", alias));
    Ok(())
}

pub async fn load(vault: &SecretVault, id: &SecretId, raw: bool) -> Result<()> {
    let secret = vault.load(id).await?;
    if raw {
        println!("{}", Zeroizing::new(hex::encode(secret.expose())).as_str());
    } else {
        let value =
            std::str::from_utf8(secret.expose()).map_err(|_| Error::NotUtf8)?;
        println!("{}", value);
    }

    let record = vault.record(id).await?;
    if !record.damaged.is_empty() {
        warn(format!(
            "{} of {} fragments are damaged, update the secret to repair it",
            record.damaged.len(),
            record.total,
        ));
    }
    Ok(())
}

pub async fn delete(vault: &SecretVault, id: &SecretId) -> Result<()> {
    let alias = vault.alias(id).await?;
    match vault.delete(id).await {
        Ok(_) => success(format!("Deleted {}", alias)),
        Err(seedlock_vault::Error::KeyCleanup { aliases }) => {
            success(format!("Deleted {}", alias));
            fail(format!(
                "unable to remove fragment keys {}",
                aliases.join(", ")
            ));
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

pub async fn list(vault: &SecretVault, json: bool) -> Result<()> {
    let summaries = vault.list().await?;
    if json {
        serde_json::to_writer_pretty(std::io::stdout(), &summaries)?;
        println!();
        return Ok(());
    }

    for summary in summaries {
        let status = if !summary.recoverable {
            "unrecoverable".red()
        } else if !summary.damaged.is_empty() {
            "damaged".yellow()
        } else {
            "ok".green()
        };
        println!(
            "{} {} {} {}/{} {}",
            summary.id,
            summary.alias.bold(),
            summary.created_at,
            summary.threshold,
            summary.total,
            status,
        );
    }
    Ok(())
}
