//! The contact form.

use clap::Args;

use handcraft_storefront::Storefront;
use handcraft_storefront::contact::ContactForm;

use crate::error::CliError;
use crate::output::Output;

#[derive(Debug, Args)]
pub struct ContactArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    subject: String,

    #[arg(long)]
    message: String,
}

impl From<ContactArgs> for ContactForm {
    fn from(args: ContactArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            subject: args.subject,
            message: args.message,
        }
    }
}

pub async fn send(storefront: &Storefront, out: Output, args: ContactArgs) -> Result<(), CliError> {
    let receipt = storefront.submit_contact(&args.into()).await?;
    out.receipt(&receipt)
}
