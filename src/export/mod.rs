//! Tabular output. Column names and order are the tool's fixed export
//! contract; the Spanish headers match the files downstream consumers
//! already parse.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::error::Result;
use crate::core::results::{RepoRecord, UserRecord};

pub const USER_COLUMNS: [&str; 10] = [
    "Usuario",
    "Nombre",
    "Perfil",
    "Bio",
    "Ubicación",
    "Email",
    "Seguidores",
    "Repos Públicos",
    "Creado en",
    "Relevancia",
];

pub const REPO_COLUMNS: [&str; 4] = ["Nombre", "URL", "Descripción", "Estrellas"];

/// Append a `.csv` suffix when the caller left it off.
pub fn csv_path(name: &str) -> PathBuf {
    if name.ends_with(".csv") {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{}.csv", name))
    }
}

pub fn write_users_csv(records: &[UserRecord], path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_row(&mut writer, USER_COLUMNS.iter().map(|c| c.to_string()))?;

    for user in records {
        write_row(
            &mut writer,
            [
                user.login.clone(),
                opt_str(&user.name),
                opt_str(&user.profile_url),
                opt_str(&user.bio),
                opt_str(&user.location),
                opt_str(&user.email),
                opt_num(user.followers),
                opt_num(user.public_repos),
                opt_str(&user.created_at),
                user.score.map(|s| s.to_string()).unwrap_or_default(),
            ]
            .into_iter(),
        )?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_repos_csv(records: &[RepoRecord], path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_row(&mut writer, REPO_COLUMNS.iter().map(|c| c.to_string()))?;

    for repo in records {
        write_row(
            &mut writer,
            [
                repo.full_name.clone(),
                repo.html_url.clone(),
                opt_str(&repo.description),
                repo.stargazers_count.to_string(),
            ]
            .into_iter(),
        )?;
    }

    writer.flush()?;
    Ok(())
}

fn opt_str(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn opt_num(value: Option<u64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

fn write_row<W: Write>(writer: &mut W, fields: impl Iterator<Item = String>) -> Result<()> {
    let line = fields.map(|f| escape(&f)).collect::<Vec<_>>().join(",");
    writeln!(writer, "{}", line)?;
    Ok(())
}

/// RFC 4180 quoting: fields containing a comma, quote, or newline are
/// wrapped in quotes with inner quotes doubled.
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn user(login: &str) -> UserRecord {
        UserRecord {
            login: login.to_string(),
            name: None,
            profile_url: None,
            bio: None,
            location: None,
            email: None,
            followers: None,
            public_repos: None,
            created_at: None,
            score: None,
        }
    }

    #[test]
    fn test_csv_suffix_appended_once() {
        assert_eq!(csv_path("results"), PathBuf::from("results.csv"));
        assert_eq!(csv_path("results.csv"), PathBuf::from("results.csv"));
    }

    #[test]
    fn test_escape_quotes_and_commas() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_user_header_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.csv");
        write_users_csv(&[], &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents.lines().next().unwrap(),
            "Usuario,Nombre,Perfil,Bio,Ubicación,Email,Seguidores,Repos Públicos,Creado en,Relevancia"
        );
    }

    #[test]
    fn test_absent_fields_render_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.csv");

        let mut record = user("alice");
        record.bio = Some("researcher, osint".to_string());
        record.followers = Some(42);
        write_users_csv(&[record], &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let row = contents.lines().nth(1).unwrap();
        assert_eq!(row, "alice,,,\"researcher, osint\",,,42,,,");
    }

    #[test]
    fn test_repo_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("repos.csv");

        let repo = RepoRecord {
            id: 7,
            name: "scanner".to_string(),
            full_name: "acme/scanner".to_string(),
            html_url: "https://github.com/acme/scanner".to_string(),
            description: None,
            stargazers_count: 321,
        };
        write_repos_csv(&[repo], &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().next().unwrap(), "Nombre,URL,Descripción,Estrellas");
        assert_eq!(
            contents.lines().nth(1).unwrap(),
            "acme/scanner,https://github.com/acme/scanner,,321"
        );
    }
}
