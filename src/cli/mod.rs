use clap::{command, Parser};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[clap(short, long, default_value_t = ("0.0.0.0:8080").to_string())]
    pub addr: String,

    #[clap(long, default_value_t = ("./fib-history.txt".to_string()))]
    pub fib_history: String,

    #[clap(long, default_value_t = ("./fact-history.txt".to_string()))]
    pub fact_history: String,

    #[clap(long, default_value_t = ("./fact-big-history.txt".to_string()))]
    pub fact_big_history: String,
}
