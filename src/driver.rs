use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use reqwest::Client;
use tracing::{info, warn};

use crate::entry::CareerEntry;
use crate::settings::{Credentials, Settings};
use crate::{api, output, profile};

/// Stats returned after a run.
pub struct RunStats {
    pub total: usize,
    pub ok: usize,
    pub failed: usize,
}

/// Everything a run needs, built once in `main`.
pub struct Job<'a> {
    pub client: &'a Client,
    pub settings: &'a Settings,
    pub creds: &'a Credentials,
    /// Skip the API even when credentials are present.
    pub scrape_only: bool,
}

impl Job<'_> {
    fn use_api(&self) -> bool {
        !self.scrape_only && self.creds.is_complete()
    }

    /// One API attempt, then one page scrape. `None` only when the page
    /// fetch fails too.
    pub async fn build_entry(&self, keyword: &str) -> Option<CareerEntry> {
        if self.use_api() {
            match api::fetch_entry(self.client, self.settings, self.creds, keyword).await {
                Ok(entry) => return Some(entry),
                Err(e) => warn!("API path failed for {}: {}", keyword, e),
            }
        }

        match profile::fetch_entry(self.client, self.settings, keyword).await {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Failed to fetch {}: {}", keyword, e);
                None
            }
        }
    }

    /// Process `keywords` in order, pausing between them.
    pub async fn collect(&self, keywords: &[String]) -> Vec<CareerEntry> {
        let total = keywords.len();
        let delay = Duration::from_millis(self.settings.delay_ms);

        let target = progress_target(std::io::stdout().is_terminal());
        let pb = ProgressBar::with_draw_target(Some(total as u64), target);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );

        let mut entries = Vec::with_capacity(total);
        for (i, keyword) in keywords.iter().enumerate() {
            pb.set_message(keyword.clone());
            pb.suspend(|| println!("[{}/{}] Fetching: {}", i + 1, total, keyword));

            match self.build_entry(keyword).await {
                Some(entry) => {
                    pb.suspend(|| println!("  -> got {}", entry.summary()));
                    entries.push(entry);
                }
                None => pb.suspend(|| println!("  -> failed")),
            }
            pb.inc(1);

            if i + 1 < total && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        pb.finish_and_clear();
        entries
    }

    /// Collect all keywords and write the dataset to `out`.
    pub async fn run(&self, keywords: &[String], out: &Path) -> Result<RunStats> {
        info!(
            "Collecting {} keywords ({})",
            keywords.len(),
            if self.use_api() { "API with page fallback" } else { "pages only" }
        );
        let entries = self.collect(keywords).await;
        output::write_entries(out, &entries)?;
        let written = output::read_entries(out)?;
        info!("Verified {} entries in {}", written.len(), out.display());
        println!("\nWrote {} entries={}", out.display(), entries.len());

        Ok(RunStats {
            total: keywords.len(),
            ok: entries.len(),
            failed: keywords.len() - entries.len(),
        })
    }
}

/// The bar draws on stderr, but only when stdout is an interactive terminal.
fn progress_target(stdout_is_tty: bool) -> ProgressDrawTarget {
    if stdout_is_tty {
        ProgressDrawTarget::stderr()
    } else {
        ProgressDrawTarget::hidden()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    struct Route {
        prefix: String,
        status: u16,
        body: Vec<u8>,
    }

    fn route(prefix: &str, status: u16, body: impl Into<Vec<u8>>) -> Route {
        Route {
            prefix: prefix.to_string(),
            status,
            body: body.into(),
        }
    }

    /// Minimal HTTP/1.1 responder: first route whose prefix matches the
    /// request path wins, anything else is a 404.
    async fn serve(routes: Vec<Route>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut sock, _)) = listener.accept().await else {
                    return;
                };
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match sock.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                let request = String::from_utf8_lossy(&buf);
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                let (status, body) = routes
                    .iter()
                    .find(|r| path.starts_with(&r.prefix))
                    .map(|r| (r.status, r.body.clone()))
                    .unwrap_or((404, b"not found".to_vec()));
                let head = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: text/html\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n",
                    status,
                    body.len()
                );
                let _ = sock.write_all(head.as_bytes()).await;
                let _ = sock.write_all(&body).await;
                let _ = sock.shutdown().await;
            }
        });
        format!("http://{}", addr)
    }

    fn settings(api_base: &str, site: &str) -> Settings {
        Settings {
            api_base: api_base.to_string(),
            profile_url: format!("{}/profile", site),
            region: "TX".into(),
            location: "texas".into(),
            user_agent: "careers_prepop-test".into(),
            timeout_secs: 5,
            delay_ms: 0,
            search_limit: 50,
            env_file: ".env".into(),
            output: "unused.json".into(),
        }
    }

    fn test_client() -> Client {
        Client::builder().no_proxy().build().unwrap()
    }

    fn creds() -> Credentials {
        Credentials {
            user_id: Some("uid".into()),
            token: Some("token-1234-abcd".into()),
        }
    }

    fn nursing_html() -> String {
        std::fs::read_to_string("tests/fixtures/nursing.html").unwrap()
    }

    #[tokio::test]
    async fn api_network_error_falls_back_to_page() {
        let site = serve(vec![route("/profile?keyword=Nursing", 200, nursing_html())]).await;
        // nothing listens on port 1
        let settings = settings("http://127.0.0.1:1/v1", &site);
        let (client, creds) = (test_client(), creds());
        let job = Job {
            client: &client,
            settings: &settings,
            creds: &creds,
            scrape_only: false,
        };

        let entry = job.build_entry("Nursing").await.unwrap();
        assert_eq!(entry.title, "Registered Nurses");
        assert_eq!(entry.keyword, "Nursing");
        assert_eq!(entry.onet_code, None);
        assert_eq!(entry.median_wage, Some(81220));
        assert!(entry.source_url.unwrap().contains("keyword=Nursing&location=texas"));
    }

    #[tokio::test]
    async fn api_path_builds_entry_from_detail() {
        let search =
            r#"{"OccupationList":[{"OnetCode":"29-1141.00","OnetTitle":"Registered Nurses"}]}"#;
        let detail = r#"{"OccupationDetail":[{
            "OnetDescription":"Assess patient health problems.",
            "Wages":{"NationalWagesList":[{"Median":54320}]},
            "TypicalEducation":"Bachelor's degree",
            "AlternateTitles":["Staff Nurse"]
        }]}"#;
        let site = serve(vec![
            route("/v1/occupation/uid/Nursing/N/0/50?", 200, search),
            route("/v1/occupation/uid/29-1141.00/TX?", 200, detail),
        ])
        .await;
        let settings = settings(&format!("{}/v1", site), &site);
        let (client, creds) = (test_client(), creds());
        let job = Job {
            client: &client,
            settings: &settings,
            creds: &creds,
            scrape_only: false,
        };

        let entry = job.build_entry("Nursing").await.unwrap();
        assert_eq!(entry.onet_code.as_deref(), Some("29-1141.00"));
        assert_eq!(entry.median_wage, Some(54320));
        assert_eq!(entry.related_occupations, Some(vec!["Staff Nurse".to_string()]));
        assert_eq!(entry.activities, None);
    }

    #[tokio::test]
    async fn unauthorized_api_falls_back_and_scrape_only_skips_api() {
        let site = serve(vec![
            route("/v1/", 401, "{}"),
            route("/profile?keyword=Nursing", 200, nursing_html()),
        ])
        .await;
        let settings = settings(&format!("{}/v1", site), &site);
        let (client, creds) = (test_client(), creds());

        let job = Job {
            client: &client,
            settings: &settings,
            creds: &creds,
            scrape_only: false,
        };
        assert_eq!(job.build_entry("Nursing").await.unwrap().onet_code, None);

        let job = Job {
            client: &client,
            settings: &settings,
            creds: &creds,
            scrape_only: true,
        };
        assert!(!job.use_api());
        assert_eq!(job.build_entry("Nursing").await.unwrap().title, "Registered Nurses");
    }

    #[tokio::test]
    async fn page_failure_skips_keyword() {
        let site = serve(vec![route("/profile", 500, "oops")]).await;
        let settings = settings(&format!("{}/v1", site), &site);
        let client = test_client();
        let creds = Credentials::default();
        let job = Job {
            client: &client,
            settings: &settings,
            creds: &creds,
            scrape_only: false,
        };
        assert!(job.build_entry("Music").await.is_none());
    }

    #[tokio::test]
    async fn run_writes_one_entry_per_successful_keyword() {
        let site = serve(vec![
            route("/profile?keyword=Broken", 503, "down"),
            route("/profile?keyword=Liberal+Arts", 200, "<div>Select an occupation.</div>"),
            route("/profile?keyword=Nursing", 200, nursing_html()),
        ])
        .await;
        let settings = settings(&format!("{}/v1", site), &site);
        let client = test_client();
        let creds = Credentials::default();
        let job = Job {
            client: &client,
            settings: &settings,
            creds: &creds,
            scrape_only: false,
        };

        let keywords: Vec<String> = ["Nursing", "Broken", "Liberal Arts"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let out = std::env::temp_dir()
            .join(format!("careers_prepop_run_{}/out.json", std::process::id()));
        let stats = job.run(&keywords, &out).await.unwrap();
        assert_eq!((stats.total, stats.ok, stats.failed), (3, 2, 1));

        let written = output::read_entries(&out).unwrap();
        assert_eq!(written.len(), 2);
        assert!(written.iter().all(|e| !e.title.is_empty() && !e.keyword.is_empty()));
        assert_eq!(written[0].keyword, "Nursing");
        assert_eq!(written[1].title, "Liberal Arts");
        std::fs::remove_dir_all(out.parent().unwrap()).unwrap();
    }

    #[tokio::test]
    async fn invalid_utf8_in_page_is_dropped() {
        let page = b"<h1>Enfermer\xe9a</h1>".to_vec();
        let site = serve(vec![route("/profile?keyword=Nursing", 200, page)]).await;
        let settings = settings(&format!("{}/v1", site), &site);
        let client = test_client();

        let entry = profile::fetch_entry(&client, &settings, "Nursing").await.unwrap();
        assert_eq!(entry.title, "Enfermera");
        assert!(!entry.title.contains('\u{fffd}'));
    }

    #[test]
    fn progress_hidden_without_terminal() {
        assert!(progress_target(false).is_hidden());
    }
}
