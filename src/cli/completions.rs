use clap::Args;

/// Arguments for completions command
#[derive(Args, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    sync-dependency completions bash > ~/.bash_completion.d/sync-dependency\n\n\
                  Generate zsh completions:\n    sync-dependency completions zsh > ~/.zfunc/_sync-dependency\n\n\
                  Generate fish completions:\n    sync-dependency completions fish > ~/.config/fish/completions/sync-dependency.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
