use super::{project_document, InitStep};
use crate::error::Result;
use crate::io;
use crate::paths::README_MD;
use std::path::Path;

const BODY: &str = "\
## Getting Started

### Install

```bash
pkg install
```

### Build

```bash
pkg build
```

### Test

```bash
pkg test
```
";

/// Writes a starter `README.md`. Opt-in.
pub struct ReadmeStep;

impl InitStep for ReadmeStep {
    fn name(&self) -> &str {
        "readme"
    }

    fn enabled_by_default(&self) -> bool {
        false
    }

    fn run(&self, root: &Path, name: &str) -> Result<i32> {
        let content = project_document(name, BODY);
        if io::write_if_missing(&root.join(README_MD), content.as_bytes())? {
            println!("Created {README_MD}");
        }
        Ok(0)
    }
}
