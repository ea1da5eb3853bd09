use crate::domain::model::{LoginForm, RegistrationForm, ServiceForm, Tier};
use clap::{Args, Subcommand};

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Register a new dealer account and sign in
    Register(RegisterArgs),

    /// Sign in with business email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Clear the saved session
    Logout,

    /// Show the signed-in dealer
    Whoami,

    /// List dealer tiers and their benefits
    Tiers,

    /// Manage the ordered services list
    Services {
        #[command(subcommand)]
        action: ServicesCommand,
    },
}

#[derive(Debug, Clone, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub business_email: String,
    #[arg(long)]
    pub phone_number: String,
    #[arg(long)]
    pub company_name: String,
    #[arg(long)]
    pub business_website_url: String,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub state: String,
    #[arg(long, default_value = "bronze")]
    pub tier: Tier,
    #[arg(long)]
    pub password: String,
    /// Defaults to --password when omitted
    #[arg(long)]
    pub confirm_password: Option<String>,
}

impl From<RegisterArgs> for RegistrationForm {
    fn from(args: RegisterArgs) -> Self {
        let confirm_password = args
            .confirm_password
            .unwrap_or_else(|| args.password.clone());

        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            business_email: args.business_email,
            phone_number: args.phone_number,
            company_name: args.company_name,
            business_website_url: args.business_website_url,
            address: args.address,
            city: args.city,
            state: args.state,
            tier: args.tier,
            password: args.password,
            confirm_password,
        }
    }
}

pub fn login_form(email: String, password: String) -> LoginForm {
    LoginForm { email, password }
}

#[derive(Debug, Clone, Subcommand)]
pub enum ServicesCommand {
    /// Show services in display order
    List,

    /// Append a service
    Add(ServiceArgs),

    /// Replace title/description/price of an existing service
    Edit {
        id: String,
        #[command(flatten)]
        service: ServiceArgs,
    },

    /// Delete a service
    Remove { id: String },

    /// Flip public visibility
    Toggle { id: String },

    /// Move a service to the position of another one
    Move { id: String, over: String },

    /// Load the demo services when the list is empty
    Seed,
}

#[derive(Debug, Clone, Args)]
pub struct ServiceArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
}

impl From<ServiceArgs> for ServiceForm {
    fn from(args: ServiceArgs) -> Self {
        Self {
            title: args.title,
            description: args.description,
            price: args.price,
        }
    }
}
