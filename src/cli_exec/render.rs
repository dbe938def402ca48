use binspect::model::{RequestRecord, clock_time, human_size, short_id};

/// One row in a snapshot listing or a tail stream.
pub(super) fn request_line(index: u64, record: &RequestRecord) -> String {
    format!(
        "[{}] {} {:<6} {} ({}) {}",
        index,
        clock_time(record.timestamp),
        record.method,
        display_path(record),
        human_size(record.size),
        short_id(&record.id),
    )
}

pub(super) fn display_path(record: &RequestRecord) -> &str {
    if record.path.is_empty() {
        "/"
    } else {
        &record.path
    }
}

pub(super) fn print_record(record: &RequestRecord) {
    println!("id: {}", record.id);
    println!("time: {}", clock_time(record.timestamp));
    println!("method: {}", record.method);
    println!("path: {}", display_path(record));
    if let Some(query) = &record.query {
        for (key, value) in query {
            println!("query: {}={}", key, value);
        }
    }
    if let Some(ip) = &record.ip {
        println!("ip: {}", ip);
    }
    println!("size: {}", human_size(record.size));
    if let Some(content_type) = &record.content_type {
        println!("content-type: {}", content_type);
    }
    for (name, value) in &record.headers {
        println!("header: {}: {}", name, value);
    }
    if let Some(body) = &record.body {
        if !body.is_empty() {
            println!("body:");
            println!("{}", body);
        }
    }
}
