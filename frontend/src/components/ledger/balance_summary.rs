use shared::{Denomination, LedgerSummary};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BalanceSummaryProps {
    pub summary: LedgerSummary,
}

#[function_component(BalanceSummary)]
pub fn balance_summary(props: &BalanceSummaryProps) -> Html {
    let summary = &props.summary;

    html! {
        <section class="balance-summary">
            <h2>{"Wallet"}</h2>
            <div class={classes!("balance-total", summary.balance.has_debt().then_some("in-debt"))}>
                {&summary.formatted_balance}
            </div>
            <ul class="balance-coins">
                {for Denomination::ALL.iter().map(|denomination| {
                    let value = summary.balance.get(*denomination);
                    let amount = format!("{} {}", value, denomination.abbreviation());
                    html! {
                        <li class={classes!("coin", (value < 0).then_some("negative"))}>
                            <span class="coin-label">{denomination.label()}</span>
                            <span class="coin-value">{amount}</span>
                        </li>
                    }
                })}
            </ul>
            <div class="balance-count">
                {format!("{} transaction(s)", summary.transaction_count)}
            </div>
        </section>
    }
}
