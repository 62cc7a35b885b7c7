use shared::{AmountType, FormattedTransaction};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TransactionHistoryProps {
    pub rows: Vec<FormattedTransaction>,
    pub on_delete: Callback<String>,
    /// Disables delete buttons while an effect is outstanding
    pub pending: bool,
}

#[function_component(TransactionHistory)]
pub fn transaction_history(props: &TransactionHistoryProps) -> Html {
    if props.rows.is_empty() {
        return html! {
            <section class="transactions-section">
                <h2>{"History"}</h2>
                <div class="empty-state">{"No transactions yet"}</div>
            </section>
        };
    }

    html! {
        <section class="transactions-section">
            <h2>{"History"}</h2>
            <div class="table-container">
                <table class="transactions-table">
                    <thead>
                        <tr>
                            <th>{"Date"}</th>
                            <th>{"Description"}</th>
                            <th>{"Category"}</th>
                            <th>{"Amount"}</th>
                            <th>{"Balance"}</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {for props.rows.iter().map(|row| {
                            let amount_class = match row.amount_type {
                                AmountType::Positive => "amount positive",
                                AmountType::Negative => "amount negative",
                            };
                            let on_click = {
                                let on_delete = props.on_delete.clone();
                                let id = row.id.clone();
                                Callback::from(move |_: MouseEvent| on_delete.emit(id.clone()))
                            };

                            html! {
                                <tr key={row.id.clone()}>
                                    <td class="date">{&row.formatted_date}</td>
                                    <td class="description">{&row.description}</td>
                                    <td class="category">{&row.category_label}</td>
                                    <td class={amount_class}>{&row.formatted_amount}</td>
                                    <td class="balance">{&row.formatted_balance}</td>
                                    <td class="actions">
                                        <button
                                            class="btn btn-icon delete-transaction-btn"
                                            title="Delete transaction"
                                            onclick={on_click}
                                            disabled={props.pending}
                                        >
                                            {"✕"}
                                        </button>
                                    </td>
                                </tr>
                            }
                        })}
                    </tbody>
                </table>
            </div>
        </section>
    }
}
