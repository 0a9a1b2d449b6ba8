use super::{project_document, InitStep};
use crate::error::Result;
use crate::io;
use crate::paths::AGENTS_MD;
use std::path::Path;

const BODY: &str = "\
## Overview

<!-- Describe what this project does -->

## Development

### Setup

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

/// Writes an `AGENTS.md` describing the pkg workflow.
pub struct AgentMdStep;

impl InitStep for AgentMdStep {
    fn name(&self) -> &str {
        "agent-md"
    }

    fn enabled_by_default(&self) -> bool {
        true
    }

    fn run(&self, root: &Path, name: &str) -> Result<i32> {
        let content = project_document(name, BODY);
        if io::write_if_missing(&root.join(AGENTS_MD), content.as_bytes())? {
            println!("Created {AGENTS_MD}");
        }
        Ok(0)
    }
}
