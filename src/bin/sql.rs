use agrum_neon::{QueryResult, ToSqlText};
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Run a SQL statement against the database set in `DATABASE_URL`.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CommandLine {
    /// SQL statement, parameters are referred as `$1`, `$2`…
    query: String,

    /// Statement parameters, in Postgres text format.
    params: Vec<String>,

    /// Text printed for NULL values.
    #[arg(long, default_value = "")]
    null: String,
}

impl CommandLine {
    async fn execute(&self) -> anyhow::Result<QueryResult> {
        let sql = agrum_neon::sql().context("could not initialize the database client")?;
        let params: Vec<&dyn ToSqlText> = self.params.iter().map(|p| p as &dyn ToSqlText).collect();

        let result = sql
            .query(&self.query, &params)
            .await
            .with_context(|| format!("query failed against {}", sql.endpoint().unwrap_or_default()))?;

        Ok(result)
    }

    fn print(&self, result: &QueryResult) {
        if result.fields().is_empty() {
            println!(
                "{} {}",
                result.command(),
                result.row_count().unwrap_or_default()
            );
            return;
        }

        let header: Vec<&str> = result.fields().iter().map(|f| f.name()).collect();
        println!("{}", header.join("\t"));

        for row in result.rows() {
            let line: Vec<String> = (0..row.len())
                .map(|index| {
                    row.get_index::<Option<String>>(index)
                        .ok()
                        .flatten()
                        .unwrap_or_else(|| self.null.clone())
                })
                .collect();
            println!("{}", line.join("\t"));
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let command_line = CommandLine::parse();
    let result = command_line.execute().await?;
    command_line.print(&result);

    Ok(())
}
