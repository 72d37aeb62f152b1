/*!
# Zentigrity Application Assembly

Wires the voting ledger and the bid store to one injected snapshot
backend:

- [`ZentigrityConfig`]: TOML-loadable configuration with defaults
- [`Zentigrity`]: constructs the backend, hydrates both stores on init,
  flushes them on shutdown
- `refresh_proposals`: derives the ballot from the current approved bids

## Example Usage

```rust,no_run
use zentigrity_app::{Zentigrity, ZentigrityConfig};

# async fn run() -> zentigrity_app::Result<()> {
let config = ZentigrityConfig::default();
let app = Zentigrity::init(&config).await?;

app.refresh_proposals().await?;
app.shutdown().await?;
# Ok(())
# }
```
*/

pub mod app;
pub mod config;
pub mod error;

pub use app::Zentigrity;
pub use config::{StorageBackend, StorageConfig, ZentigrityConfig};
pub use error::{AppError, Result};
