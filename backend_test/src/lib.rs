use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    parse::Parser, punctuated::Punctuated, spanned::Spanned, FnArg, ItemFn, LitStr, Pat,
    Signature, Token, Type,
};

/// Transform an asynchronous test into a synchronous one, inject dependencies,
/// and check the election's invariants once the test body passes. A panic in
/// the body is re-raised unchanged.
///
/// Injectable dependencies are [`rocket::local::asynchronous::Client`] and
/// `ElectionHandle`, which share the same election.
///
/// Any string literals passed as arguments are registered as members before the
/// test body runs, e.g. `#[backend_test("alice", "bob")]`.
#[proc_macro_attribute]
pub fn backend_test(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut item_fn = match syn::parse::<ItemFn>(input) {
        Ok(item_fn) => item_fn,
        Err(err) => return err.into_compile_error().into(),
    };

    let members = match Punctuated::<LitStr, Token![,]>::parse_terminated.parse(args) {
        Ok(members) => members.into_iter().collect::<Vec<_>>(),
        Err(err) => return err.into_compile_error().into(),
    };

    // Extract type information and reject invalid function signatures.
    let test_args = match check_sig(item_fn.sig.clone()) {
        Ok(args) => args,
        Err(err) => {
            return err.into_compile_error().into();
        }
    };

    // Rename the future so the test can have its original name.
    let name = item_fn.sig.ident.clone();
    let new_name = format_ident!("{}_fut", name);
    item_fn.sig.ident = new_name.clone();

    // Rewrite the test function.
    quote! {
        #[test]
        #[allow(unused_variables)]
        fn #name() {
            /// Test setup.
            async fn setup() -> (
                rocket::local::asynchronous::Client,
                crate::model::election::ElectionHandle,
            ) {
                log4rs_test_utils::test_logging::init_logging_once_for(
                    ["election_coordinator"],
                    None,
                    None,
                );

                let election = crate::model::election::ElectionHandle::default();
                #(
                    election
                        .register(crate::model::api::command::RegisterCommand {
                            agent_id: crate::model::common::AgentId::from(#members),
                        })
                        .await;
                )*
                let rocket_client = rocket::local::asynchronous::Client::tracked(
                    crate::rocket_for_election(election.clone()),
                )
                .await
                .unwrap();

                (rocket_client, election)
            }

            /// The test itself.
            #item_fn

            /// Test cleanup: the tally must agree with the ballots cast.
            async fn cleanup(election: crate::model::election::ElectionHandle) {
                let state = election.read().await;
                let counted: u64 = state.tally().iter().map(|(_, count)| count).sum();
                assert_eq!(counted, state.ballot_count() as u64, "tally out of step with ballots");
                if state.ballot_count() > 0 {
                    assert_eq!(state.phase(), crate::model::election::ElectionPhase::Voting);
                }
            }

            // Create an async runtime. We need a separate one for inside and
            // outside the `catch_unwind`.
            let outer_runtime = rocket::tokio::runtime::Builder::new_multi_thread()
                .thread_name("test-setup-cleanup")
                .worker_threads(1)
                .enable_all()
                .build()
                .unwrap();
            let inner_runtime = rocket::tokio::runtime::Builder::new_multi_thread()
                .thread_name("test-body")
                .worker_threads(1)
                .enable_all()
                .build()
                .unwrap();

            // Run the setup.
            let (rocket_client, election) = outer_runtime.block_on(setup());

            // Run the test, catching any panics.
            // Use mutexes to safely transfer `!UnwindSafe` data.
            let client_mutex = std::sync::Mutex::new(rocket_client);
            let election_mutex = std::sync::Mutex::new(election.clone());
            let runtime_mutex = std::sync::Mutex::new(inner_runtime);
            let result = std::panic::catch_unwind(|| {
                let rocket_client = client_mutex.into_inner().unwrap();
                let election = election_mutex.into_inner().unwrap();
                let runtime = runtime_mutex.into_inner().unwrap();

                runtime.block_on(#new_name(#(#test_args),*));
            });

            // Run the cleanup. A panicking test takes priority over a failed check.
            if result.is_ok() {
                outer_runtime.block_on(cleanup(election));
            }

            // If the test panicked, re-raise the panic.
            if let Err(cause) = result {
                std::panic::panic_any(cause);
            }
        }
    }
    .into()
}

/// Ensure the wrapped test is async, extract parameters to inject, and reject unknown parameters.
fn check_sig(sig: Signature) -> Result<Vec<TokenStream2>, syn::Error> {
    if sig.asyncness.is_none() {
        return Err(syn::Error::new(sig.span(), "Test must be marked `async`"));
    }

    let mut has_client = false;
    let mut has_election = false;
    let mut args = vec![];

    for input in &sig.inputs {
        if let FnArg::Typed(pat_type) = input {
            if let (Pat::Ident(_), Type::Path(type_path)) = (&*pat_type.pat, &*pat_type.ty) {
                if let Some(type_ident) = type_path.path.segments.last().map(|s| &s.ident) {
                    if type_ident == "Client" {
                        if has_client {
                            return Err(syn::Error::new(
                                input.span(),
                                "Test cannot accept more than one `rocket::local::asynchronous::Client`",
                            ));
                        }
                        has_client = true;
                        args.push(quote! { rocket_client });
                        continue;
                    } else if type_ident == "ElectionHandle" {
                        if has_election {
                            return Err(syn::Error::new(
                                input.span(),
                                "Test cannot accept more than one `ElectionHandle`",
                            ));
                        }
                        has_election = true;
                        args.push(quote! { election });
                        continue;
                    }
                }
            }
        }

        return Err(syn::Error::new(
            input.span(),
            "Expected one of `client_ident: Client` or `election_ident: ElectionHandle`",
        ));
    }

    Ok(args)
}
