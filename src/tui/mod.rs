mod app;
mod ui;

use crate::api::Filter;
use crate::error::Result;
use crate::fetch::HttpFetcher;

pub use app::App;

/// Run the interactive comparison screen.
pub fn run(api_url: &str, filter: Filter) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let fetcher = HttpFetcher::over_http(api_url)?;

    let mut app = App::new(fetcher, runtime.handle().clone(), filter);
    app.run()
}
