use utoipa::OpenApi;

use crate::{
    api::models::{
        AddExpenseRequest, AddMemberRequest, CreateGroupRequest, CreateUserRequest, ErrorResponse,
        GroupDetail, SettleRequest,
    },
    core::{
        models::{
            expense::{Expense, ExpenseRecord},
            group::Group,
            settlement::{DirectedBalance, SettlementInstruction},
            split::Split,
            user::User,
        },
        service::{GroupStats, MemberShare, OutstandingBalance, SettlementReceipt},
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::create_user,
        super::handlers::get_user,
        super::handlers::groups_for_user,
        super::handlers::user_settlements,
        super::handlers::user_outstanding,
        super::handlers::create_group,
        super::handlers::get_group,
        super::handlers::add_member,
        super::handlers::group_expenses,
        super::handlers::group_balances,
        super::handlers::group_settlements,
        super::handlers::group_stats,
        super::handlers::add_expense,
        super::handlers::settle
    ),
    components(schemas(
        CreateUserRequest,
        CreateGroupRequest,
        AddMemberRequest,
        AddExpenseRequest,
        SettleRequest,
        GroupDetail,
        ErrorResponse,
        User,
        Group,
        Expense,
        ExpenseRecord,
        Split,
        DirectedBalance,
        SettlementInstruction,
        GroupStats,
        MemberShare,
        OutstandingBalance,
        SettlementReceipt
    )),
    info(
        title = "Tally API",
        description = "API for recording shared expenses and settling group balances",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
