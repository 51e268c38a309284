use crate::ast::TableOptions;

/// Table options in their fixed rendering order. Absent options are skipped.
pub fn table_options(options: &TableOptions) -> Vec<String> {
    let mut rendered = Vec::new();

    if let Some(engine) = &options.engine {
        rendered.push(format!("ENGINE {}", engine));
    }
    for start in &options.auto_increment {
        rendered.push(format!("AUTO_INCREMENT {}", start));
    }
    if let Some(charset) = &options.charset {
        rendered.push(format!("CHARACTER SET {}", charset));
    }
    if let Some(comment) = &options.comment {
        rendered.push(format!("COMMENT {}", comment));
    }
    if let Some(method) = options.insert_method {
        rendered.push(format!("INSERT_METHOD {}", method.as_str()));
    }
    if let Some(max) = options.max_rows {
        rendered.push(format!("MAX_ROWS {}", max));
    }
    if let Some(min) = options.min_rows {
        rendered.push(format!("MIN_ROWS {}", min));
    }

    rendered
}
