pub const POST_DOCUMENT: &str = r#"---
layout: post
title: "My Title!"
date: 2024-01-01 09:30:00 +0300
tags: [general]
author: Alex
excerpt: "Hello world"
---

Hello world
"#;

pub const THOUGHT_DOCUMENT: &str = r#"---
layout: post
title: "Thought: 2024/01/01"
date: 2024-01-01 09:30:00 +0300
tags: [thoughts, notes]
author: Alex
---

Remember to water the plants
"#;

pub const DRAFT_DOCUMENT: &str = r#"---
layout: post
title: "Why Rust"
date: 2024-01-01 09:30:00 +0300
tags: [draft]
author: Alex
published: false
---

# Why Rust

## Outline:

- intro
- body

---
*This is a draft - complete it before publishing*
"#;
