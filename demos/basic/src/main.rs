use autowire::{Arguments, Class, Error, Parameter, Shared, global, implements, overrides};
use tracing_subscriber::EnvFilter;

trait Mailer: Send + Sync {
    fn send(&self, to: &str, body: &str) -> String;
}

struct SmtpMailer {
    host: String,
}

impl Mailer for SmtpMailer {
    fn send(&self, to: &str, body: &str) -> String {
        format!("smtp://{} -> {}: {}", self.host, to, body)
    }
}

impl Class for SmtpMailer {
    fn parameters() -> Vec<Parameter> {
        vec![Parameter::optional("host", "localhost".to_string())]
    }

    fn construct(args: Arguments) -> Result<Self, Error> {
        Ok(SmtpMailer {
            host: args.get("host")?,
        })
    }
}

struct Signup {
    mailer: Shared<dyn Mailer>,
    greeting: String,
}

impl Signup {
    fn register(&self, email: &str) -> String {
        self.mailer.send(email, &self.greeting)
    }
}

impl Class for Signup {
    fn parameters() -> Vec<Parameter> {
        vec![
            Parameter::interface::<dyn Mailer>("mailer"),
            Parameter::required("greeting"),
        ]
    }

    fn construct(args: Arguments) -> Result<Self, Error> {
        Ok(Signup {
            mailer: args.service::<dyn Mailer>("mailer")?,
            greeting: args.get("greeting")?,
        })
    }
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("autowire=debug")),
        )
        .init();

    let container = global();
    implements!(container, SmtpMailer => dyn Mailer);
    container.singleton::<dyn Mailer, SmtpMailer>()?;
    container.bind_self::<Signup>()?;

    let first = container.make_with::<Signup>(&overrides! { "greeting" => "Welcome!".to_string() })?;
    let second = container.make_with::<Signup>(&overrides! { "greeting" => "Hello again".to_string() })?;

    println!("{}", first.register("ada@example.com"));
    println!("{}", second.register("grace@example.com"));
    println!("Same mailer? {}", Shared::ptr_eq(&first.mailer, &second.mailer));

    match container.make::<Signup>() {
        Ok(_) => println!("Unexpected success"),
        Err(err) => println!("Without overrides: {}", err),
    }

    println!("Container {:?}", container);

    Ok(())
}
