use std::io::{self, Write};
use std::net::SocketAddr;
use std::time::Duration;

use dnsq::{RecordData, RecordType, Resolver, ResourceRecord};
use tracing_subscriber::EnvFilter;

const REMOTE_RESOLVER: &str = "8.8.8.8:53";
const TIMEOUT: Duration = Duration::from_secs(2);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    print!("Enter hostname: ");
    io::stdout().flush().expect("flush stdout");

    let mut hostname = String::new();
    io::stdin()
        .read_line(&mut hostname)
        .expect("read hostname");
    let hostname = hostname.trim();

    let server: SocketAddr = REMOTE_RESOLVER.parse().expect("resolver address");

    println!();
    println!("Server: {}", server.ip());
    println!("Address: {}#{}", server.ip(), server.port());

    let resolver = Resolver::new(server, TIMEOUT);
    let message = match resolver.lookup(hostname, RecordType::A) {
        Ok(message) => message,
        Err(e) => {
            eprintln!("lookup failed: {e}");
            std::process::exit(1);
        }
    };

    println!();
    println!("Answer Count: {}", message.header.num_answers);
    println!(
        "Authoritative Record Count: {}",
        message.header.num_authorities
    );
    println!("Additional Record Count: {}", message.header.num_additionals);
    println!();

    println!("QUESTION:");
    for question in &message.questions {
        println!("    Name: {}", question.name);
        println!("    Type: {}", question.type_);
        match question.class {
            1 => println!("    Class: IN"),
            other => println!("    Class: {other}"),
        }
    }
    println!();

    print_section("ANSWERS", &message.answers);
    print_section("AUTHORITATIVE RECORDS", &message.authorities);
    print_section("ADDITIONAL RECORDS", &message.additionals);
}

fn print_section(title: &str, records: &[ResourceRecord]) {
    println!("{title}:");
    for record in records {
        print_record(record);
    }
    println!();
}

fn print_record(record: &ResourceRecord) {
    println!("------------------------------------");
    println!("    Name: {}", record.name);
    println!("    Record type: '{}'", record.type_);
    println!("    TTL: {}", record.ttl);

    match &record.data {
        RecordData::A(addr) => println!("    Resolved IP: {addr}"),
        RecordData::Cname(name) => println!("    Canonical Name: {name}"),
        RecordData::Soa {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        } => {
            println!("    mname: {mname}");
            println!("    rname: {rname}");
            println!("    serial: {serial}");
            println!("    refresh: {refresh}");
            println!("    retry: {retry}");
            println!("    expire: {expire}");
            println!("    minimum: {minimum}");
        }
        RecordData::Unknown(data) => {
            println!("    {} bytes of unparsed record data", data.len());
        }
    }
}
